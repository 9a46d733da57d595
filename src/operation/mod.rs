//! Graph operations
//!
//! An operation is an immutable description of one atomic increment to the
//! graph. Applying it is split in two phases:
//!
//! 1. [`Mutation::validate`] checks every precondition against the current
//!    store without touching it
//! 2. [`Mutation::commit`] performs the change on a store that passed
//!    validation
//!
//! The controller never calls `commit` without a successful `validate` on the
//! same state, so a rejected operation leaves no trace.
//!
//! ```rust
//! use noop_graph::graph::{Clazz, EdgeType, GraphStore, Library, Method, Project};
//! use noop_graph::operation::{Mutation, NewElementOperation, Operation, RootOperation};
//!
//! let mut store = GraphStore::new();
//! let project = Project::new("Noop", "com.google.noop", "Apache 2");
//! let lang = Library::new("lang");
//! let void = Clazz::new("Void");
//! let print = Method::new("print");
//!
//! let ops: Vec<Operation> = vec![
//!     RootOperation::new(project.clone()).into(),
//!     NewElementOperation::new(lang.clone(), project.id).into(),
//!     NewElementOperation::new(void.clone(), lang.id).into(),
//!     NewElementOperation::new(print.clone(), void.id)
//!         .with_edge(EdgeType::TypeOf, void.id)
//!         .into(),
//! ];
//! for op in &ops {
//!     op.validate(&store).unwrap();
//!     op.commit(&mut store).unwrap();
//! }
//! assert_eq!(store.edges(print.id, EdgeType::TypeOf), &[void.id]);
//! ```

mod add;
mod remove;

pub use add::{NewEdgeOperation, NewElementOperation, RootOperation};
pub use remove::{RemoveEdgeOperation, RemoveElementOperation};

use crate::graph::{EdgeStamp, ElementId, GraphResult, GraphStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability shared by every operation kind
pub trait Mutation {
    /// Check every precondition against `store` without mutating it
    fn validate(&self, store: &GraphStore) -> GraphResult<()>;

    /// Apply the change to a store that accepted [`Mutation::validate`]
    fn commit(&self, store: &mut GraphStore) -> GraphResult<()>;

    /// The element this operation creates, if any
    fn introduced(&self) -> Option<ElementId> {
        None
    }
}

/// Any operation the controller accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Root(RootOperation),
    NewElement(NewElementOperation),
    NewEdge(NewEdgeOperation),
    RemoveElement(RemoveElementOperation),
    RemoveEdge(RemoveEdgeOperation),
}

impl Operation {
    /// Element created without a container, other than the root
    pub fn orphan(&self) -> Option<ElementId> {
        match self {
            Operation::NewElement(op) if op.container().is_none() => Some(op.element().id()),
            _ => None,
        }
    }

    /// The operation that undoes this one, when it exists
    ///
    /// `stamps` are the stamps of the edges this operation added, in
    /// declaration order; an edge addition is undone by removing exactly those
    /// occurrences. Removals cannot be undone because the removed elements are
    /// not part of the operation.
    pub fn inverse(&self, stamps: &[EdgeStamp]) -> Option<Operation> {
        match self {
            Operation::Root(op) => Some(RemoveElementOperation::new(op.project().id).into()),
            Operation::NewElement(op) => {
                Some(RemoveElementOperation::new(op.element().id()).into())
            }
            Operation::NewEdge(op) => {
                let undo =
                    RemoveEdgeOperation::exact(op.source(), op.edges().clone(), stamps.to_vec());
                Some(undo.into())
            }
            Operation::RemoveElement(_) | Operation::RemoveEdge(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Root(_) => "root",
            Operation::NewElement(_) => "new_element",
            Operation::NewEdge(_) => "new_edge",
            Operation::RemoveElement(_) => "remove_element",
            Operation::RemoveEdge(_) => "remove_edge",
        }
    }

    fn as_mutation(&self) -> &dyn Mutation {
        match self {
            Operation::Root(op) => op,
            Operation::NewElement(op) => op,
            Operation::NewEdge(op) => op,
            Operation::RemoveElement(op) => op,
            Operation::RemoveEdge(op) => op,
        }
    }
}

impl Mutation for Operation {
    fn validate(&self, store: &GraphStore) -> GraphResult<()> {
        self.as_mutation().validate(store)
    }

    fn commit(&self, store: &mut GraphStore) -> GraphResult<()> {
        self.as_mutation().commit(store)
    }

    fn introduced(&self) -> Option<ElementId> {
        self.as_mutation().introduced()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Root(op) => write!(f, "root {}", op.project().id),
            Operation::NewElement(op) => write!(
                f,
                "new_element {} ({} edges)",
                op.element(),
                op.edges().len()
            ),
            Operation::NewEdge(op) => {
                write!(f, "new_edge {} ({} edges)", op.source(), op.edges().len())
            }
            Operation::RemoveElement(op) => write!(f, "remove_element {}", op.element()),
            Operation::RemoveEdge(op) => {
                write!(f, "remove_edge {} ({} edges)", op.source(), op.edges().len())
            }
        }
    }
}

impl From<RootOperation> for Operation {
    fn from(op: RootOperation) -> Self {
        Operation::Root(op)
    }
}

impl From<NewElementOperation> for Operation {
    fn from(op: NewElementOperation) -> Self {
        Operation::NewElement(op)
    }
}

impl From<NewEdgeOperation> for Operation {
    fn from(op: NewEdgeOperation) -> Self {
        Operation::NewEdge(op)
    }
}

impl From<RemoveElementOperation> for Operation {
    fn from(op: RemoveElementOperation) -> Self {
        Operation::RemoveElement(op)
    }
}

impl From<RemoveEdgeOperation> for Operation {
    fn from(op: RemoveEdgeOperation) -> Self {
        Operation::RemoveEdge(op)
    }
}
