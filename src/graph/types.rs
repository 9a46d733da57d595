//! Core type definitions for the language graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::store::GraphError;

/// Stable, opaque identifier for a language element
///
/// Ids are chosen by the producer when an element value is built, never by
/// the store, so replaying the same operations reproduces the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        ElementId(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        ElementId(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        ElementId(uuid)
    }
}

/// Identity of one edge occurrence
///
/// Stamps are handed out by the store in the order edges are added, so the
/// same history always produces the same stamps. They tell apart duplicate
/// edges that share a source, type and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeStamp(pub u64);

impl fmt::Display for EdgeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of directed relation between two elements
///
/// The set is closed: names outside it fail to parse with
/// [`GraphError::InvalidEdgeType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum EdgeType {
    /// "has type": a method's return type, a parameter's declared type
    #[serde(rename = "TYPEOF")]
    TypeOf,
}

impl EdgeType {
    /// Every known edge type
    pub const ALL: [EdgeType; 1] = [EdgeType::TypeOf];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::TypeOf => "TYPEOF",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GraphError::InvalidEdgeType(s.to_string()))
    }
}
