//! Shared, thread-safe access to a controller
//!
//! Submissions take the write lock for the whole validate, mutate and append
//! sequence, so concurrent submitters are serialized and readers only ever
//! see completed states.

use super::{Applied, Controller, HistoryEntry};
use crate::graph::{EdgeType, ElementId, GraphResult, GraphStore, LanguageElement};
use crate::operation::Operation;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to one controller
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<RwLock<Controller>>,
}

impl SharedController {
    pub fn new(controller: Controller) -> Self {
        Self {
            inner: Arc::new(RwLock::new(controller)),
        }
    }

    /// Apply an operation on behalf of the configured default author
    pub async fn apply(&self, operation: impl Into<Operation>) -> GraphResult<Applied> {
        self.inner.write().await.apply(operation)
    }

    pub async fn submit(
        &self,
        operation: impl Into<Operation>,
        author: impl Into<String>,
    ) -> GraphResult<Applied> {
        self.inner.write().await.submit(operation, author)
    }

    pub async fn compensate(&self, sequence: u64, author: impl Into<String>) -> GraphResult<Applied> {
        self.inner.write().await.compensate(sequence, author)
    }

    pub async fn get_element(&self, id: ElementId) -> Option<LanguageElement> {
        self.inner.read().await.get_element(id).cloned()
    }

    pub async fn get_edges(&self, id: ElementId, edge_type: EdgeType) -> Vec<ElementId> {
        self.inner.read().await.get_edges(id, edge_type).to_vec()
    }

    pub async fn get_history(&self) -> Vec<HistoryEntry> {
        self.inner.read().await.get_history().to_vec()
    }

    /// Copy of the graph as of the latest completed operation
    pub async fn snapshot(&self) -> GraphStore {
        self.inner.read().await.store().clone()
    }

    /// Run `f` against a consistent view of the controller
    pub async fn read<R>(&self, f: impl FnOnce(&Controller) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }
}

impl From<Controller> for SharedController {
    fn from(controller: Controller) -> Self {
        Self::new(controller)
    }
}
