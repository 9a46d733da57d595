//! Append-only operation history

use crate::graph::{EdgeStamp, ElementId};
use crate::operation::Operation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal condition surfaced by a successful apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// A non-root element was created without a container
    OrphanedElement(ElementId),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OrphanedElement(id) => write!(f, "element {} has no container", id),
        }
    }
}

/// One applied operation with its audit metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the history, starting at 1
    pub sequence: u64,
    pub operation: Operation,
    pub author: String,
    pub applied_at: DateTime<Utc>,
    pub warnings: Vec<Warning>,
    /// Sequence number of the entry this one undoes
    pub compensates: Option<u64>,
    /// Stamps of the edges this entry added, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edge_stamps: Vec<EdgeStamp>,
}

impl HistoryEntry {
    /// The operation that undoes this entry, when it exists
    pub fn inverse(&self) -> Option<Operation> {
        self.operation.inverse(&self.edge_stamps)
    }
}

/// Outcome of a successful apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub sequence: u64,
    pub warnings: Vec<Warning>,
}

impl Applied {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
