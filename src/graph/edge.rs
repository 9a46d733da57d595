//! Typed outgoing edges of a single source element
//!
//! An [`EdgeMap`] is an ordered multimap from [`EdgeType`] to destination ids.
//! Destinations under one type keep their insertion order and duplicates are
//! preserved: adding `TYPEOF -> b` twice yields `[b, b]`.

use super::types::{EdgeType, ElementId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered multimap `EdgeType -> [ElementId]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMap {
    edges: IndexMap<EdgeType, Vec<ElementId>>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dest` to the sequence for `edge_type`
    pub fn push(&mut self, edge_type: EdgeType, dest: ElementId) {
        self.edges.entry(edge_type).or_default().push(dest);
    }

    /// Destinations for one edge type, in insertion order
    pub fn get(&self, edge_type: EdgeType) -> &[ElementId] {
        self.edges
            .get(&edge_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index of the most recently added occurrence of `dest` under `edge_type`
    pub fn last_index_of(&self, edge_type: EdgeType, dest: ElementId) -> Option<usize> {
        self.get(edge_type).iter().rposition(|d| *d == dest)
    }

    /// Remove the destination at `index` under `edge_type`
    ///
    /// Empty sequences are dropped so that removing every added edge restores
    /// an equal map.
    pub fn remove_at(&mut self, edge_type: EdgeType, index: usize) -> Option<ElementId> {
        let dests = self.edges.get_mut(&edge_type)?;
        if index >= dests.len() {
            return None;
        }
        let dest = dests.remove(index);
        if dests.is_empty() {
            self.edges.shift_remove(&edge_type);
        }
        Some(dest)
    }

    /// All `(type, dest)` pairs, grouped by type in first-use order
    pub fn iter(&self) -> impl Iterator<Item = (EdgeType, ElementId)> + '_ {
        self.edges
            .iter()
            .flat_map(|(t, dests)| dests.iter().map(move |d| (*t, *d)))
    }

    pub fn contains(&self, edge_type: EdgeType, dest: ElementId) -> bool {
        self.get(edge_type).contains(&dest)
    }

    /// Total number of edges
    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<(EdgeType, ElementId)> for EdgeMap {
    fn from_iter<I: IntoIterator<Item = (EdgeType, ElementId)>>(iter: I) -> Self {
        let mut map = EdgeMap::new();
        for (edge_type, dest) in iter {
            map.push(edge_type, dest);
        }
        map
    }
}
