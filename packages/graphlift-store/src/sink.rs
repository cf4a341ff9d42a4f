//! Size-bounded batching of documents with a serialized submission point.

use crate::document::Document;
use crate::estimate::SizeEstimator;
use crate::ports::DocumentStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Serialized submission point shared by every sink of a run.
///
/// The store client behind [`DocumentStore`] is treated as unsafe for
/// concurrent bulk calls, so every submission takes the same mutex before
/// touching it. Submission failures are logged and the batch is dropped:
/// delivery is at-most-once, with the failure count exposed so callers can
/// see what was lost.
pub struct Submitter {
    store: Arc<dyn DocumentStore>,
    gate: Mutex<()>,
    submitted: AtomicU64,
    failed: AtomicU64,
}

impl Submitter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
            submitted: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Submit one batch through the serialized entry point.
    pub async fn submit(&self, batch: Vec<Document>) {
        let count = batch.len();
        let _gate = self.gate.lock().await;
        match self.store.bulk(batch).await {
            Ok(()) => {
                self.submitted.fetch_add(1, Ordering::Relaxed);
                debug!("submitted batch of {count} documents");
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                error!("unable to write batch of {count} documents to the document store: {e}");
            }
        }
    }

    /// Batches accepted by the store so far.
    pub fn batches_submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Batches dropped after a failed submission.
    pub fn batches_failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// A per-worker document batch with a running size estimate.
///
/// Each worker owns exactly one sink; sinks are never shared, so the hot
/// `add` path takes no locks. Once the estimate reaches the threshold the
/// batch is flushed through the shared [`Submitter`] and reset. Whatever
/// remains when the worker's input is exhausted goes out via [`close`].
///
/// [`close`]: BulkSink::close
pub struct BulkSink {
    name: String,
    submitter: Arc<Submitter>,
    estimator: Arc<dyn SizeEstimator>,
    threshold_bytes: usize,
    batch: Vec<Document>,
    batch_bytes: usize,
    ingested: u64,
}

impl BulkSink {
    pub fn new(
        name: impl Into<String>,
        submitter: Arc<Submitter>,
        estimator: Arc<dyn SizeEstimator>,
        threshold_bytes: usize,
    ) -> Self {
        Self {
            name: name.into(),
            submitter,
            estimator,
            threshold_bytes,
            batch: Vec::new(),
            batch_bytes: 0,
            ingested: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documents accepted by this sink so far.
    pub fn ingested(&self) -> u64 {
        self.ingested
    }

    /// Documents currently buffered and not yet submitted.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Append a document; once the running estimate reaches the threshold
    /// the batch is flushed.
    pub async fn add(&mut self, document: Document) {
        self.batch_bytes += self.estimator.estimate(&document);
        self.batch.push(document);
        self.ingested += 1;

        if self.batch_bytes >= self.threshold_bytes {
            self.flush().await;
            info!("{} has ingested {} documents", self.name, self.ingested);
        }
    }

    /// Submit the current batch, if any, and reset.
    pub async fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.batch);
        self.batch_bytes = 0;
        self.submitter.submit(batch).await;
    }

    /// Flush the remainder and consume the sink, returning the total number
    /// of documents it ingested.
    pub async fn close(mut self) -> u64 {
        self.flush().await;
        self.ingested
    }
}
