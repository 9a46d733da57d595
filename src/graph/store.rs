//! In-memory graph storage
//!
//! Elements live in a single arena keyed by [`ElementId`]. Containers and edge
//! destinations are stored as ids, never as owning links, so the
//! element <-> container and element <-> destination cycles of the language
//! model need no shared ownership.

use super::edge::EdgeMap;
use super::element::{ElementKind, LanguageElement};
use super::types::{EdgeStamp, EdgeType, ElementId};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors that can occur while validating or applying graph mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Element {0} already exists")]
    DuplicateElement(ElementId),

    #[error("Container {0} does not exist")]
    UnknownContainer(ElementId),

    #[error("Element {0} does not exist")]
    UnknownElement(ElementId),

    #[error("Edge destination {0} does not exist")]
    UnknownEdgeDestination(ElementId),

    #[error("Unknown edge type: {0}")]
    InvalidEdgeType(String),

    #[error("Element {0} is still referenced by other elements")]
    HasDependents(ElementId),

    #[error("Element {0} has no container")]
    OrphanedElement(ElementId),

    #[error("A {container} cannot contain a {child}")]
    InvalidContainment {
        child: ElementKind,
        container: ElementKind,
    },

    #[error("Project {0} can only be introduced by a root operation")]
    RootRequired(ElementId),

    #[error("Root operation requires an empty graph ({0} elements present)")]
    StoreNotEmpty(usize),

    #[error("Edge {stamp} is not a {edge_type} edge from {from} to {to}")]
    UnknownEdgeStamp {
        from: ElementId,
        edge_type: EdgeType,
        to: ElementId,
        stamp: EdgeStamp,
    },

    #[error("{edges} edges listed with {stamps} stamps")]
    EdgeStampMismatch { edges: usize, stamps: usize },

    #[error("No {edge_type} edge from {from} to {to}")]
    UnknownEdge {
        from: ElementId,
        edge_type: EdgeType,
        to: ElementId,
    },

    #[error("No operation with sequence number {0}")]
    UnknownSequence(u64),

    #[error("Operation {0} has no compensating operation")]
    NotCompensable(u64),

    #[error("Operation {0} was already compensated")]
    AlreadyCompensated(u64),

    #[error("Element introduced by operation {sequence} was re-introduced by operation {by}")]
    Superseded { sequence: u64, by: u64 },

    #[error("Entry does not hold the compensation of operation {0}")]
    CompensationMismatch(u64),
}

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone)]
struct Slot {
    element: LanguageElement,
    container: Option<ElementId>,
    edges: EdgeMap,
    /// Parallel to `edges`: one stamp per destination, same positions
    stamps: IndexMap<EdgeType, Vec<EdgeStamp>>,
}

impl Slot {
    fn new(element: LanguageElement, container: Option<ElementId>) -> Self {
        Slot {
            element,
            container,
            edges: EdgeMap::new(),
            stamps: IndexMap::new(),
        }
    }

    fn push_edge(&mut self, edge_type: EdgeType, dest: ElementId, stamp: EdgeStamp) {
        self.edges.push(edge_type, dest);
        self.stamps.entry(edge_type).or_default().push(stamp);
    }

    fn index_of_stamp(&self, edge_type: EdgeType, stamp: EdgeStamp) -> Option<usize> {
        self.stamps.get(&edge_type)?.iter().position(|s| *s == stamp)
    }

    fn remove_edge_at(&mut self, edge_type: EdgeType, index: usize) -> Option<ElementId> {
        let dest = self.edges.remove_at(edge_type, index)?;
        if let Some(stamps) = self.stamps.get_mut(&edge_type) {
            if index < stamps.len() {
                stamps.remove(index);
            }
            if stamps.is_empty() {
                self.stamps.shift_remove(&edge_type);
            }
        }
        Some(dest)
    }
}

// Stamps are bookkeeping; equal graphs may have been reached by different paths
impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
            && self.container == other.container
            && self.edges == other.edges
    }
}

/// In-memory language graph
///
/// - elements: ElementId -> element, container, outgoing edges (creation order)
/// - children: container -> contained ids (creation order)
/// - incoming: destination -> (source, type), one entry per edge
///
/// Two stores compare equal when they hold the same elements with the same
/// attributes, containers and edge sequences.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    elements: IndexMap<ElementId, Slot>,
    children: HashMap<ElementId, Vec<ElementId>>,
    incoming: HashMap<ElementId, Vec<(ElementId, EdgeType)>>,
    root: Option<ElementId>,
    next_stamp: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `element` could be inserted under `container`
    pub fn check_add(
        &self,
        element: &LanguageElement,
        container: Option<ElementId>,
    ) -> GraphResult<()> {
        let id = element.id();
        if self.contains(id) {
            return Err(GraphError::DuplicateElement(id));
        }
        if let Some(container_id) = container {
            let parent = self
                .get(container_id)
                .ok_or(GraphError::UnknownContainer(container_id))?;
            if !parent.kind().can_contain(element.kind()) {
                return Err(GraphError::InvalidContainment {
                    child: element.kind(),
                    container: parent.kind(),
                });
            }
        }
        Ok(())
    }

    /// Insert a new element
    ///
    /// The first project inserted without a container becomes the root.
    pub fn add(
        &mut self,
        element: LanguageElement,
        container: Option<ElementId>,
    ) -> GraphResult<()> {
        self.check_add(&element, container)?;

        let id = element.id();
        if element.is_root() && container.is_none() && self.root.is_none() {
            self.root = Some(id);
        }
        if let Some(container_id) = container {
            self.children.entry(container_id).or_default().push(id);
        }
        self.elements.insert(id, Slot::new(element, container));
        Ok(())
    }

    /// Check that both endpoints of an edge exist
    pub fn check_edge(&self, source: ElementId, dest: ElementId) -> GraphResult<()> {
        if !self.contains(source) {
            return Err(GraphError::UnknownElement(source));
        }
        if !self.contains(dest) {
            return Err(GraphError::UnknownElement(dest));
        }
        Ok(())
    }

    /// Append `source -[edge_type]-> dest`, returning the stamp of the new edge
    pub fn add_edge(
        &mut self,
        source: ElementId,
        edge_type: EdgeType,
        dest: ElementId,
    ) -> GraphResult<EdgeStamp> {
        self.check_edge(source, dest)?;

        let stamp = EdgeStamp(self.next_stamp);
        let slot = self
            .elements
            .get_mut(&source)
            .ok_or(GraphError::UnknownElement(source))?;
        slot.push_edge(edge_type, dest, stamp);
        self.next_stamp += 1;
        self.incoming
            .entry(dest)
            .or_default()
            .push((source, edge_type));
        Ok(stamp)
    }

    /// Stamp the next added edge will receive
    pub fn next_stamp(&self) -> EdgeStamp {
        EdgeStamp(self.next_stamp)
    }

    /// Stamps of `id`'s edges of one type, positionally matching [`GraphStore::edges`]
    pub fn edge_stamps(&self, id: ElementId, edge_type: EdgeType) -> &[EdgeStamp] {
        self.elements
            .get(&id)
            .and_then(|slot| slot.stamps.get(&edge_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check that `source -[edge_type]-> dest` is present
    pub fn check_remove_edge(
        &self,
        source: ElementId,
        edge_type: EdgeType,
        dest: ElementId,
    ) -> GraphResult<()> {
        let slot = self
            .elements
            .get(&source)
            .ok_or(GraphError::UnknownElement(source))?;
        if !slot.edges.contains(edge_type, dest) {
            return Err(GraphError::UnknownEdge {
                from: source,
                edge_type,
                to: dest,
            });
        }
        Ok(())
    }

    /// Remove the most recently added `source -[edge_type]-> dest`
    pub fn remove_edge(
        &mut self,
        source: ElementId,
        edge_type: EdgeType,
        dest: ElementId,
    ) -> GraphResult<()> {
        self.check_remove_edge(source, edge_type, dest)?;

        if let Some(slot) = self.elements.get_mut(&source) {
            if let Some(index) = slot.edges.last_index_of(edge_type, dest) {
                slot.remove_edge_at(edge_type, index);
            }
        }
        self.forget_incoming(source, edge_type, dest);
        Ok(())
    }

    /// Check that the edge stamped `stamp` is `source -[edge_type]-> dest`
    pub fn check_remove_stamped(
        &self,
        source: ElementId,
        edge_type: EdgeType,
        dest: ElementId,
        stamp: EdgeStamp,
    ) -> GraphResult<()> {
        let slot = self
            .elements
            .get(&source)
            .ok_or(GraphError::UnknownElement(source))?;
        let matches = slot
            .index_of_stamp(edge_type, stamp)
            .and_then(|index| slot.edges.get(edge_type).get(index))
            .is_some_and(|d| *d == dest);
        if !matches {
            return Err(GraphError::UnknownEdgeStamp {
                from: source,
                edge_type,
                to: dest,
                stamp,
            });
        }
        Ok(())
    }

    /// Remove exactly the edge occurrence stamped `stamp`
    pub fn remove_stamped(
        &mut self,
        source: ElementId,
        edge_type: EdgeType,
        dest: ElementId,
        stamp: EdgeStamp,
    ) -> GraphResult<()> {
        self.check_remove_stamped(source, edge_type, dest, stamp)?;

        if let Some(slot) = self.elements.get_mut(&source) {
            if let Some(index) = slot.index_of_stamp(edge_type, stamp) {
                slot.remove_edge_at(edge_type, index);
            }
        }
        self.forget_incoming(source, edge_type, dest);
        Ok(())
    }

    fn forget_incoming(&mut self, source: ElementId, edge_type: EdgeType, dest: ElementId) {
        if let Some(sources) = self.incoming.get_mut(&dest) {
            if let Some(pos) = sources
                .iter()
                .rposition(|(s, t)| *s == source && *t == edge_type)
            {
                sources.remove(pos);
            }
        }
    }

    /// Check whether `id` could be removed
    ///
    /// Without `cascade`, removal is refused while other elements name `id`
    /// as their container or as an edge destination.
    pub fn check_remove(&self, id: ElementId, cascade: bool) -> GraphResult<()> {
        if !self.contains(id) {
            return Err(GraphError::UnknownElement(id));
        }
        if cascade {
            return Ok(());
        }
        let has_children = !self.children_of(id).is_empty();
        let has_referrers = self
            .incoming
            .get(&id)
            .is_some_and(|sources| sources.iter().any(|(s, _)| *s != id));
        if has_children || has_referrers {
            return Err(GraphError::HasDependents(id));
        }
        Ok(())
    }

    /// Remove an element
    ///
    /// With `cascade`, everything it contains is removed as well (children
    /// first) and edges from surviving elements into the removed set are
    /// dropped. Returns the removed elements in removal order.
    pub fn remove(&mut self, id: ElementId, cascade: bool) -> GraphResult<Vec<LanguageElement>> {
        self.check_remove(id, cascade)?;

        let mut doomed = Vec::new();
        self.collect_post_order(id, &mut doomed);

        Ok(doomed
            .into_iter()
            .filter_map(|target| self.detach(target))
            .collect())
    }

    fn collect_post_order(&self, id: ElementId, out: &mut Vec<ElementId>) {
        for child in self.children_of(id) {
            self.collect_post_order(*child, out);
        }
        out.push(id);
    }

    fn detach(&mut self, id: ElementId) -> Option<LanguageElement> {
        let slot = self.elements.shift_remove(&id)?;

        for (edge_type, dest) in slot.edges.iter() {
            self.forget_incoming(id, edge_type, dest);
        }

        if let Some(sources) = self.incoming.remove(&id) {
            let mut seen = HashSet::new();
            for (source, _) in sources {
                if seen.insert(source) {
                    if let Some(referrer) = self.elements.get_mut(&source) {
                        for edge_type in EdgeType::ALL {
                            while let Some(index) = referrer.edges.last_index_of(edge_type, id) {
                                referrer.remove_edge_at(edge_type, index);
                            }
                        }
                    }
                }
            }
        }

        if let Some(container) = slot.container {
            if let Some(siblings) = self.children.get_mut(&container) {
                siblings.retain(|c| *c != id);
            }
        }
        self.children.remove(&id);

        if self.root == Some(id) {
            self.root = None;
        }
        Some(slot.element)
    }

    /// Get an element by id
    pub fn get(&self, id: ElementId) -> Option<&LanguageElement> {
        self.elements.get(&id).map(|slot| &slot.element)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Destinations of `id`'s edges of one type, in insertion order
    pub fn edges(&self, id: ElementId, edge_type: EdgeType) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|slot| slot.edges.get(edge_type))
            .unwrap_or(&[])
    }

    /// All outgoing edges of `id`
    pub fn edge_map(&self, id: ElementId) -> Option<&EdgeMap> {
        self.elements.get(&id).map(|slot| &slot.edges)
    }

    /// Elements holding an edge to `id`, one entry per edge
    pub fn referrers(&self, id: ElementId) -> &[(ElementId, EdgeType)] {
        self.incoming.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn container_of(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|slot| slot.container)
    }

    /// Directly contained elements, in creation order
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Directly contained elements of one kind, e.g. the comments of a class
    pub fn children_of_kind(&self, id: ElementId, kind: ElementKind) -> Vec<&LanguageElement> {
        self.children_of(id)
            .iter()
            .filter_map(|child| self.get(*child))
            .filter(|element| element.kind() == kind)
            .collect()
    }

    pub fn root(&self) -> Option<&LanguageElement> {
        self.root.and_then(|id| self.get(id))
    }

    /// Elements without a container, excluding the root
    pub fn orphans(&self) -> Vec<&LanguageElement> {
        self.elements
            .iter()
            .filter(|(id, slot)| slot.container.is_none() && Some(**id) != self.root)
            .map(|(_, slot)| &slot.element)
            .collect()
    }

    /// All elements in creation order
    pub fn elements(&self) -> impl Iterator<Item = &LanguageElement> {
        self.elements.values().map(|slot| &slot.element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.elements.values().map(|slot| slot.edges.len()).sum()
    }
}

impl PartialEq for GraphStore {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.elements == other.elements
    }
}

impl Eq for GraphStore {}
