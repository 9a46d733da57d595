//! Operations that grow the graph

use super::Mutation;
use crate::graph::{
    EdgeMap, EdgeType, ElementId, GraphError, GraphResult, GraphStore, LanguageElement, Project,
};
use serde::{Deserialize, Serialize};

/// Introduce the project at the root of an empty graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootOperation {
    project: Project,
}

impl RootOperation {
    pub fn new(project: Project) -> Self {
        RootOperation { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Mutation for RootOperation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        if !store.is_empty() {
            return Err(GraphError::StoreNotEmpty(store.len()));
        }
        store.check_add(&LanguageElement::Project(self.project.clone()), None)
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        store.add(self.project.clone().into(), None)
    }

    fn introduced(&self) -> Option<ElementId> {
        Some(self.project.id)
    }
}

/// Introduce one non-root element, optionally with edges to existing elements
///
/// Every declared edge originates at the new element. An edge may point back
/// at the new element itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewElementOperation {
    element: LanguageElement,
    container: Option<ElementId>,
    edges: EdgeMap,
}

impl NewElementOperation {
    /// New element held by `container`
    pub fn new(element: impl Into<LanguageElement>, container: ElementId) -> Self {
        NewElementOperation {
            element: element.into(),
            container: Some(container),
            edges: EdgeMap::new(),
        }
    }

    /// New element with no container
    ///
    /// Applying it succeeds but reports the element as an orphan.
    pub fn orphan(element: impl Into<LanguageElement>) -> Self {
        NewElementOperation {
            element: element.into(),
            container: None,
            edges: EdgeMap::new(),
        }
    }

    /// Declare an edge from the new element to `dest`
    pub fn with_edge(mut self, edge_type: EdgeType, dest: ElementId) -> Self {
        self.edges.push(edge_type, dest);
        self
    }

    pub fn element(&self) -> &LanguageElement {
        &self.element
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }
}

impl Mutation for NewElementOperation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        let id = self.element.id();
        if self.element.is_root() {
            return Err(GraphError::RootRequired(id));
        }
        store.check_add(&self.element, self.container)?;
        for (_, dest) in self.edges.iter() {
            if dest != id && !store.contains(dest) {
                return Err(GraphError::UnknownEdgeDestination(dest));
            }
        }
        Ok(())
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        let id = self.element.id();
        store.add(self.element.clone(), self.container)?;
        for (edge_type, dest) in self.edges.iter() {
            store.add_edge(id, edge_type, dest)?;
        }
        Ok(())
    }

    fn introduced(&self) -> Option<ElementId> {
        Some(self.element.id())
    }
}

/// Add edges between elements that already exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEdgeOperation {
    source: ElementId,
    edges: EdgeMap,
}

impl NewEdgeOperation {
    pub fn new(source: ElementId, edge_type: EdgeType, dest: ElementId) -> Self {
        let mut edges = EdgeMap::new();
        edges.push(edge_type, dest);
        NewEdgeOperation { source, edges }
    }

    pub fn with_edge(mut self, edge_type: EdgeType, dest: ElementId) -> Self {
        self.edges.push(edge_type, dest);
        self
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }
}

impl Mutation for NewEdgeOperation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        if !store.contains(self.source) {
            return Err(GraphError::UnknownElement(self.source));
        }
        for (_, dest) in self.edges.iter() {
            if !store.contains(dest) {
                return Err(GraphError::UnknownEdgeDestination(dest));
            }
        }
        Ok(())
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        for (edge_type, dest) in self.edges.iter() {
            store.add_edge(self.source, edge_type, dest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Clazz, Library, Method};

    fn rooted() -> (GraphStore, ElementId) {
        let mut store = GraphStore::new();
        let project = Project::new("Noop", "com.google.noop", "Apache 2");
        let id = project.id;
        RootOperation::new(project).commit(&mut store).unwrap();
        (store, id)
    }

    #[test]
    fn test_root_requires_empty_store() {
        let (store, _) = rooted();
        let second = RootOperation::new(Project::new("Other", "org.other", "MIT"));
        assert_eq!(second.validate(&store), Err(GraphError::StoreNotEmpty(1)));
    }

    #[test]
    fn test_project_needs_root_operation() {
        let (store, root) = rooted();
        let project = Project::new("Nested", "org.nested", "MIT");
        let id = project.id;
        let op = NewElementOperation::new(project, root);
        assert_eq!(op.validate(&store), Err(GraphError::RootRequired(id)));
    }

    #[test]
    fn test_new_element_with_edges() {
        let (mut store, root) = rooted();
        let lang = Library::new("lang");
        let lang_id = lang.id;
        NewElementOperation::new(lang, root).commit(&mut store).unwrap();

        let void = Clazz::new("Void");
        let void_id = void.id;
        NewElementOperation::new(void, lang_id).commit(&mut store).unwrap();

        let clazz = Clazz::new("Console");
        let console_id = clazz.id;
        let op = NewElementOperation::new(clazz, lang_id).with_edge(EdgeType::TypeOf, void_id);
        op.validate(&store).unwrap();
        op.commit(&mut store).unwrap();

        assert_eq!(store.edges(console_id, EdgeType::TypeOf), &[void_id]);
        assert_eq!(store.container_of(console_id), Some(lang_id));
    }

    #[test]
    fn test_unknown_edge_destination() {
        let (store, root) = rooted();
        let missing = ElementId::new();
        let op = NewElementOperation::new(Library::new("lang"), root)
            .with_edge(EdgeType::TypeOf, missing);
        assert_eq!(
            op.validate(&store),
            Err(GraphError::UnknownEdgeDestination(missing))
        );
    }

    #[test]
    fn test_self_edge_allowed() {
        let mut store = GraphStore::new();
        let clazz = Clazz::new("Self");
        let id = clazz.id;
        let op = NewElementOperation::orphan(clazz).with_edge(EdgeType::TypeOf, id);
        op.validate(&store).unwrap();
        op.commit(&mut store).unwrap();
        assert_eq!(store.edges(id, EdgeType::TypeOf), &[id]);
    }

    #[test]
    fn test_new_edge_validation() {
        let mut store = GraphStore::new();
        let method = Method::new("print");
        let m = method.id;
        NewElementOperation::orphan(method).commit(&mut store).unwrap();

        let missing = ElementId::new();
        assert_eq!(
            NewEdgeOperation::new(missing, EdgeType::TypeOf, m).validate(&store),
            Err(GraphError::UnknownElement(missing))
        );
        assert_eq!(
            NewEdgeOperation::new(m, EdgeType::TypeOf, missing).validate(&store),
            Err(GraphError::UnknownEdgeDestination(missing))
        );
    }

    #[test]
    fn test_new_edge_multiple() {
        let mut store = GraphStore::new();
        let method = Method::new("==");
        let a = Clazz::new("Boolean");
        let (m, a_id) = (method.id, a.id);
        NewElementOperation::orphan(method).commit(&mut store).unwrap();
        NewElementOperation::orphan(a).commit(&mut store).unwrap();

        let op = NewEdgeOperation::new(m, EdgeType::TypeOf, a_id).with_edge(EdgeType::TypeOf, a_id);
        assert_eq!(op.edges().len(), 2);
        op.commit(&mut store).unwrap();
        assert_eq!(store.edges(m, EdgeType::TypeOf), &[a_id, a_id]);
    }
}
