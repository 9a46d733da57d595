//! Operations that shrink the graph
//!
//! These are the forward-recorded inverses used for compensation. The
//! history never loses an entry; removing something appends a new one.

use super::Mutation;
use crate::graph::{
    EdgeMap, EdgeStamp, EdgeType, ElementId, GraphError, GraphResult, GraphStore,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Remove one element, optionally with everything it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveElementOperation {
    element: ElementId,
    cascade: bool,
}

impl RemoveElementOperation {
    /// Remove `element`; refused while anything depends on it
    pub fn new(element: ElementId) -> Self {
        RemoveElementOperation {
            element,
            cascade: false,
        }
    }

    /// Remove `element`, its contents, and every edge into them
    pub fn cascading(element: ElementId) -> Self {
        RemoveElementOperation {
            element,
            cascade: true,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_cascading(&self) -> bool {
        self.cascade
    }
}

impl Mutation for RemoveElementOperation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        store.check_remove(self.element, self.cascade)
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        store.remove(self.element, self.cascade).map(|_| ())
    }
}

/// Remove edges from one source
///
/// Without stamps each listed edge removes the latest matching occurrence.
/// With stamps, the i-th listed edge removes exactly the occurrence carrying
/// the i-th stamp, which is how an edge addition is compensated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEdgeOperation {
    source: ElementId,
    edges: EdgeMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    stamps: Vec<EdgeStamp>,
}

impl RemoveEdgeOperation {
    pub fn new(source: ElementId, edge_type: EdgeType, dest: ElementId) -> Self {
        let mut edges = EdgeMap::new();
        edges.push(edge_type, dest);
        RemoveEdgeOperation {
            source,
            edges,
            stamps: Vec::new(),
        }
    }

    pub fn with_edge(mut self, edge_type: EdgeType, dest: ElementId) -> Self {
        self.edges.push(edge_type, dest);
        self
    }

    /// Remove precisely the stamped occurrences of `edges`
    ///
    /// `stamps` pairs up with `edges` in iteration order.
    pub fn exact(source: ElementId, edges: EdgeMap, stamps: Vec<EdgeStamp>) -> Self {
        RemoveEdgeOperation {
            source,
            edges,
            stamps,
        }
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    pub fn stamps(&self) -> &[EdgeStamp] {
        &self.stamps
    }

    fn validate_stamped(&self, store: &GraphStore) -> GraphResult<()> {
        if self.stamps.len() != self.edges.len() {
            return Err(GraphError::EdgeStampMismatch {
                edges: self.edges.len(),
                stamps: self.stamps.len(),
            });
        }
        let mut seen = HashSet::new();
        for ((edge_type, dest), stamp) in self.edges.iter().zip(&self.stamps) {
            if !seen.insert(*stamp) {
                return Err(GraphError::UnknownEdgeStamp {
                    from: self.source,
                    edge_type,
                    to: dest,
                    stamp: *stamp,
                });
            }
            store.check_remove_stamped(self.source, edge_type, dest, *stamp)?;
        }
        Ok(())
    }
}

impl Mutation for RemoveEdgeOperation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        if !store.contains(self.source) {
            return Err(GraphError::UnknownElement(self.source));
        }
        if !self.stamps.is_empty() {
            return self.validate_stamped(store);
        }

        // the same edge may be listed more than once
        let mut wanted: HashMap<(EdgeType, ElementId), usize> = HashMap::new();
        for pair in self.edges.iter() {
            *wanted.entry(pair).or_default() += 1;
        }
        for ((edge_type, dest), count) in wanted {
            let present = store
                .edges(self.source, edge_type)
                .iter()
                .filter(|d| **d == dest)
                .count();
            if present < count {
                return Err(GraphError::UnknownEdge {
                    from: self.source,
                    edge_type,
                    to: dest,
                });
            }
        }
        Ok(())
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        if !self.stamps.is_empty() {
            for ((edge_type, dest), stamp) in self.edges.iter().zip(&self.stamps) {
                store.remove_stamped(self.source, edge_type, dest, *stamp)?;
            }
            return Ok(());
        }
        for (edge_type, dest) in self.edges.iter() {
            store.remove_edge(self.source, edge_type, dest)?;
        }
        Ok(())
    }
}
