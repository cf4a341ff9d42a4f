//! Port trait for the document store capability.

use crate::document::Document;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only document store capability.
///
/// Implementations wrap a concrete store client; establishing and
/// authenticating the connection happens before the trait object reaches
/// this crate.
///
/// `bulk` is NOT assumed to be safe to call concurrently: store clients are
/// treated as single-writer. All submissions inside graphlift go through
/// [`crate::sink::Submitter`], which serializes them behind one mutex.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Health check. `Ok(false)` means the store answered but is not ready;
    /// an error means it could not be reached at all.
    async fn ping(&self) -> Result<bool>;

    /// Submit one batch of documents. Append-only, at-most-once: the caller
    /// decides what to do when this fails.
    async fn bulk(&self, documents: Vec<Document>) -> Result<()>;

    /// Release the underlying client.
    async fn close(&self) -> Result<()>;
}
