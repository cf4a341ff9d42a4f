//! Pipeline configuration.

/// Default batch flush threshold: roughly 5 MB of estimated document size.
pub const DEFAULT_BATCH_THRESHOLD_BYTES: usize = 5_000_000;

/// Pipeline tuning knobs.
///
/// Values arrive here already resolved and validated by the caller; the
/// pipeline does no option parsing of its own.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Flush a worker's batch once its estimated size reaches this many
    /// bytes.
    pub batch_threshold_bytes: usize,
    /// Worker count for the raw extraction wave. Rule extraction always
    /// runs one worker per rule.
    pub worker_count: usize,
    /// Prefix for raw per-vertex document indices.
    pub raw_index_prefix: String,
    /// Prefix for rule-derived document indices.
    pub object_index_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_threshold_bytes: DEFAULT_BATCH_THRESHOLD_BYTES,
            worker_count: num_cpus::get().max(1),
            raw_index_prefix: String::new(),
            object_index_prefix: String::new(),
        }
    }
}
