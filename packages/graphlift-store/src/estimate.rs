//! Size estimation for batching.

use crate::document::Document;

/// Per-document envelope overhead assumed by the default estimator, covering
/// the action line a bulk transport wraps around each document.
pub const DEFAULT_ENVELOPE_BYTES: usize = 50;

/// Estimates the contribution of one document to a batch's size.
///
/// This is a batching heuristic, not the exact transport size: it only has
/// to be monotone enough that the sink flushes near its configured
/// threshold.
pub trait SizeEstimator: Send + Sync {
    fn estimate(&self, document: &Document) -> usize;
}

/// Default estimator: serialized JSON size of the fields plus a fixed
/// per-document envelope.
#[derive(Debug, Clone)]
pub struct JsonSizeEstimator {
    envelope_bytes: usize,
}

impl JsonSizeEstimator {
    pub fn new(envelope_bytes: usize) -> Self {
        Self { envelope_bytes }
    }
}

impl Default for JsonSizeEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_ENVELOPE_BYTES)
    }
}

impl SizeEstimator for JsonSizeEstimator {
    fn estimate(&self, document: &Document) -> usize {
        let body = serde_json::to_vec(&document.fields)
            .map(|bytes| bytes.len())
            .unwrap_or(0);
        body + self.envelope_bytes
    }
}
