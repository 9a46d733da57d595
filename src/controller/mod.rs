//! The controller: sole gate for graph mutations
//!
//! Every change to the graph goes through [`Controller::apply`]:
//!
//! 1. validate every precondition without mutating anything
//! 2. insert the new element, if any
//! 3. add the declared edges in order
//! 4. append the operation to the history with a sequence number, author and
//!    timestamp
//!
//! A failed apply returns the first violated precondition and leaves both the
//! store and the history untouched. Graph states form a single linear chain;
//! undo is a compensating operation appended to the history, never a rewrite.

mod history;
pub mod shared;

pub use history::{Applied, HistoryEntry, Warning};
pub use shared::SharedController;

use crate::config::ControllerConfig;
use crate::graph::{
    EdgeStamp, EdgeType, ElementId, GraphError, GraphResult, GraphStore, LanguageElement,
};
use crate::operation::{Mutation, Operation};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Owns the graph store and its operation history
#[derive(Debug, Clone)]
pub struct Controller {
    store: GraphStore,
    history: Vec<HistoryEntry>,
    config: ControllerConfig,
}

impl Controller {
    /// Create a controller over an empty graph
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            store: GraphStore::new(),
            history: Vec::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Rebuild a controller by re-applying recorded history from empty
    ///
    /// A compensating entry must name an earlier entry that was still
    /// compensable at that point and carry exactly its inverse.
    pub fn replay<'a>(
        entries: impl IntoIterator<Item = &'a HistoryEntry>,
        config: ControllerConfig,
    ) -> GraphResult<Self> {
        let mut controller = Self::with_config(config);
        for entry in entries {
            if let Some(target) = entry.compensates {
                if controller.compensation_for(target)? != entry.operation {
                    return Err(GraphError::CompensationMismatch(target));
                }
            }
            controller.record(
                entry.operation.clone(),
                entry.author.clone(),
                entry.compensates,
            )?;
        }
        info!("Replayed {} operations", controller.history.len());
        Ok(controller)
    }

    /// Apply an operation on behalf of the configured default author
    pub fn apply(&mut self, operation: impl Into<Operation>) -> GraphResult<Applied> {
        let author = self.config.default_author.clone();
        self.record(operation.into(), author, None)
    }

    /// Apply an operation on behalf of `author`
    pub fn submit(
        &mut self,
        operation: impl Into<Operation>,
        author: impl Into<String>,
    ) -> GraphResult<Applied> {
        self.record(operation.into(), author.into(), None)
    }

    /// Append the inverse of history entry `sequence`
    ///
    /// Only additions can be compensated, and each at most once. An element
    /// addition stops being compensable once a later entry re-introduces the
    /// same id.
    pub fn compensate(&mut self, sequence: u64, author: impl Into<String>) -> GraphResult<Applied> {
        let inverse = self.compensation_for(sequence)?;
        self.record(inverse, author.into(), Some(sequence))
    }

    fn compensation_for(&self, sequence: u64) -> GraphResult<Operation> {
        let entry = sequence
            .checked_sub(1)
            .and_then(|idx| self.history.get(idx as usize))
            .ok_or(GraphError::UnknownSequence(sequence))?;
        if self.history.iter().any(|e| e.compensates == Some(sequence)) {
            return Err(GraphError::AlreadyCompensated(sequence));
        }
        if let Some(id) = entry.operation.introduced() {
            let later = self
                .history
                .iter()
                .skip(sequence as usize)
                .find(|e| e.operation.introduced() == Some(id));
            if let Some(later) = later {
                return Err(GraphError::Superseded {
                    sequence,
                    by: later.sequence,
                });
            }
        }
        entry.inverse().ok_or(GraphError::NotCompensable(sequence))
    }

    fn record(
        &mut self,
        operation: Operation,
        author: String,
        compensates: Option<u64>,
    ) -> GraphResult<Applied> {
        if let Err(e) = self.check(&operation) {
            warn!("Rejected {}: {}", operation, e);
            return Err(e);
        }

        let first_stamp = self.store.next_stamp();
        operation.commit(&mut self.store)?;
        let edge_stamps = (first_stamp.0..self.store.next_stamp().0)
            .map(EdgeStamp)
            .collect();

        let sequence = self.history.len() as u64 + 1;
        let mut warnings = Vec::new();
        if let Some(id) = operation.orphan() {
            warn!("Operation {} created orphaned element {}", sequence, id);
            warnings.push(Warning::OrphanedElement(id));
        }
        if let Operation::Root(op) = &operation {
            info!("Introduced root project {:?} ({})", op.project().name, op.project().id);
        }
        debug!("Applied operation {}: {} by {}", sequence, operation, author);

        self.history.push(HistoryEntry {
            sequence,
            operation,
            author,
            applied_at: Utc::now(),
            warnings: warnings.clone(),
            compensates,
            edge_stamps,
        });
        Ok(Applied { sequence, warnings })
    }

    fn check(&self, operation: &Operation) -> GraphResult<()> {
        operation.validate(&self.store)?;
        if self.config.reject_orphans {
            if let Some(id) = operation.orphan() {
                return Err(GraphError::OrphanedElement(id));
            }
        }
        Ok(())
    }

    pub fn get_element(&self, id: ElementId) -> Option<&LanguageElement> {
        self.store.get(id)
    }

    /// Destinations of `id`'s edges of one type, in insertion order
    pub fn get_edges(&self, id: ElementId, edge_type: EdgeType) -> &[ElementId] {
        self.store.edges(id, edge_type)
    }

    /// Applied operations, oldest first
    pub fn get_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Sequence number of the latest applied operation, 0 when none
    pub fn last_sequence(&self) -> u64 {
        self.history.len() as u64
    }

    /// Read-only view of the graph
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
