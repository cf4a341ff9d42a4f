//! In-memory recording document store.

use crate::document::Document;
use crate::error::{Result, StoreError};
use crate::ports::DocumentStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A document store that records every submitted batch in order.
///
/// Used by tests and as a reference adapter. Failure switches let tests
/// exercise the degraded paths: an unreachable store (`set_reachable`) and
/// bulk rejections (`fail_bulk`).
#[derive(Debug)]
pub struct MemoryDocumentStore {
    batches: Mutex<Vec<Vec<Document>>>,
    reachable: AtomicBool,
    reject_bulk: AtomicBool,
    closed: AtomicBool,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            reachable: AtomicBool::new(true),
            reject_bulk: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// A store whose health check answers `false`.
    pub fn unreachable() -> Self {
        let store = Self::new();
        store.reachable.store(false, Ordering::SeqCst);
        store
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Make subsequent `bulk` calls fail.
    pub fn fail_bulk(&self, fail: bool) {
        self.reject_bulk.store(fail, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Every accepted batch, in submission order.
    pub fn batches(&self) -> Vec<Vec<Document>> {
        self.batches.lock().expect("batch log poisoned").clone()
    }

    /// All accepted documents, flattened in submission order.
    pub fn documents(&self) -> Vec<Document> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn submission_count(&self) -> usize {
        self.batches.lock().expect("batch log poisoned").len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ping(&self) -> Result<bool> {
        Ok(self.reachable.load(Ordering::SeqCst))
    }

    async fn bulk(&self, documents: Vec<Document>) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::closed());
        }
        if self.reject_bulk.load(Ordering::SeqCst) {
            return Err(StoreError::submission("bulk rejected by memory store"));
        }
        self.batches
            .lock()
            .expect("batch log poisoned")
            .push(documents);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
