//! Concurrent, rule-driven bulk extraction of a property graph into a
//! document store.
//!
//! A pipeline run health-checks the store, then executes two strictly
//! ordered waves:
//!
//! 1. **Raw extraction**: a configurable number of workers share one
//!    claim-next cursor over the materialized vertex sequence; every vertex
//!    with at least one property becomes a raw document.
//! 2. **Rule extraction**: one worker per registered [`TransformRule`],
//!    each draining its rule's document sequence.
//!
//! Workers batch documents through per-worker sinks into a single
//! serialized submission point (see `graphlift-store`). Delivery is
//! append-only and at-most-once; losses and worker faults are counted in
//! the [`PipelineReport`] rather than failing the run. Only a pre-flight
//! connectivity failure is fatal.

pub mod config;
pub mod coordinator;
pub mod cursor;
pub mod error;
pub mod rules;

pub use config::{PipelineConfig, DEFAULT_BATCH_THRESHOLD_BYTES};
pub use coordinator::{PipelineCoordinator, PipelineReport, ORIGINAL_ID_FIELD};
pub use cursor::VertexCursor;
pub use error::{PipelineError, Result};
pub use rules::{RuleRegistry, TransformRule};
