//! Document model, store port and size-bounded bulk sink for graphlift.
//!
//! Documents extracted from a graph are flat field maps addressed to an
//! (index, type) target. This crate defines:
//!
//! - the [`Document`] model;
//! - the [`DocumentStore`] port (health check, bulk submit, close);
//! - batching: a per-worker [`BulkSink`] that accumulates documents until a
//!   configured size estimate is reached, flushing through a shared
//!   [`Submitter`] that serializes every submission behind one mutex;
//! - [`SizeEstimator`] and its JSON-based default;
//! - an in-memory recording adapter, [`MemoryDocumentStore`].
//!
//! Delivery is append-only and at-most-once: a failed submission is logged,
//! counted and dropped. Callers that need durability wrap the store port
//! with their own retry layer.

pub mod document;
pub mod error;
pub mod estimate;
pub mod infrastructure;
pub mod ports;
pub mod sink;

pub use document::Document;
pub use error::{ErrorKind, Result, StoreError};
pub use estimate::{JsonSizeEstimator, SizeEstimator, DEFAULT_ENVELOPE_BYTES};
pub use infrastructure::MemoryDocumentStore;
pub use ports::DocumentStore;
pub use sink::{BulkSink, Submitter};
