//! Language graph data model
//!
//! This module implements the vertex and edge model of the semantic graph:
//! - Language elements as a closed sum type (Project, Library, Clazz, Method,
//!   Parameter, Comment)
//! - A closed set of directed edge types
//! - Ordered multimap edge storage that keeps duplicates
//! - An arena store keyed by opaque element ids

pub mod edge;
pub mod element;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::EdgeMap;
pub use element::{Clazz, Comment, ElementKind, LanguageElement, Library, Method, Parameter, Project};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeStamp, EdgeType, ElementId};
