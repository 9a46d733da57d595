//! Noop semantic graph
//!
//! The mutation layer of the Noop language model: a directed, typed graph of
//! language elements (projects, libraries, classes, methods, parameters,
//! comments) that changes only through discrete, replayable operations
//! applied by a single controller.
//!
//! # Architecture
//!
//! - [`graph`] - element model, edge types, ordered edge storage, arena store
//! - [`operation`] - immutable, all-or-nothing descriptions of one increment
//! - [`controller`] - validates and applies operations, keeps the history
//! - [`config`] - controller configuration
//!
//! # Guarantees
//!
//! - A rejected operation leaves the store and history untouched
//! - Replaying a history from an empty graph reproduces an equal graph
//! - Edges of one type keep insertion order, duplicates included
//! - The history is append-only; undo is a compensating operation
//!
//! ## Example Usage
//!
//! ```rust
//! use noop_graph::controller::Controller;
//! use noop_graph::graph::{Clazz, EdgeType, Library, Method, Project};
//! use noop_graph::operation::{NewEdgeOperation, NewElementOperation, RootOperation};
//!
//! let mut controller = Controller::new();
//!
//! let project = Project::new("Noop", "com.google.noop", "Apache 2");
//! let lang = Library::new("lang");
//! let void = Clazz::new("Void");
//! let print = Method::new("print");
//! let (p, l, v, m) = (project.id, lang.id, void.id, print.id);
//!
//! assert_eq!(controller.apply(RootOperation::new(project)).unwrap().sequence, 1);
//! controller.apply(NewElementOperation::new(lang, p)).unwrap();
//! controller.apply(NewElementOperation::new(void, l)).unwrap();
//! controller.apply(NewElementOperation::new(print, v)).unwrap();
//! controller.apply(NewEdgeOperation::new(m, EdgeType::TypeOf, v)).unwrap();
//!
//! assert_eq!(controller.get_edges(m, EdgeType::TypeOf), &[v]);
//! assert_eq!(controller.get_history().len(), 5);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod graph;
pub mod operation;

// Re-export main types for convenience
pub use config::{ConfigError, ControllerConfig};
pub use controller::{Applied, Controller, HistoryEntry, SharedController, Warning};
pub use graph::{
    Clazz, Comment, EdgeMap, EdgeStamp, EdgeType, ElementId, ElementKind, GraphError,
    GraphResult, GraphStore, LanguageElement, Library, Method, Parameter, Project,
};
pub use operation::{
    Mutation, NewEdgeOperation, NewElementOperation, Operation, RemoveEdgeOperation,
    RemoveElementOperation, RootOperation,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
