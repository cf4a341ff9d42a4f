//! Two-wave pipeline orchestration.

use crate::config::PipelineConfig;
use crate::cursor::VertexCursor;
use crate::error::{PipelineError, Result};
use crate::rules::{RuleRegistry, TransformRule};
use graphlift_graph::{GraphSource, PropertyMap, Value, Vertex};
use graphlift_store::{
    BulkSink, Document, DocumentStore, JsonSizeEstimator, SizeEstimator, Submitter,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Field under which a raw document carries its vertex's source identity.
pub const ORIGINAL_ID_FIELD: &str = "originalId";

/// Aggregated outcome of one pipeline run.
///
/// Failed batches are not retried and do not fail the run; they surface
/// here so callers can detect loss and layer durability on top if they
/// need it.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub run_id: Uuid,
    /// Raw per-vertex documents ingested by Wave A workers.
    pub raw_documents: u64,
    /// Rule-derived documents ingested by Wave B workers.
    pub rule_documents: u64,
    pub batches_submitted: u64,
    pub batches_failed: u64,
    /// Workers that died before draining their input. Their remaining work
    /// is abandoned; siblings and later waves are unaffected.
    pub worker_faults: u64,
}

/// Orchestrates extraction of a graph into the document store.
///
/// A run is two strictly ordered waves behind a connectivity pre-flight:
/// Wave A drains a shared vertex cursor with a configurable number of
/// workers, turning each vertex that has at least one property into a raw
/// document; Wave B runs one worker per registered rule. Every worker owns
/// its own [`BulkSink`]; all sinks share one serialized [`Submitter`]. The
/// store is closed when both waves are done.
pub struct PipelineCoordinator {
    store: Arc<dyn DocumentStore>,
    registry: RuleRegistry,
    config: PipelineConfig,
    estimator: Arc<dyn SizeEstimator>,
}

impl PipelineCoordinator {
    pub fn new(store: Arc<dyn DocumentStore>, registry: RuleRegistry) -> Self {
        Self {
            store,
            registry,
            config: PipelineConfig::default(),
            estimator: Arc::new(JsonSizeEstimator::default()),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn SizeEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Run both waves to completion and close the store.
    ///
    /// Fails only when the pre-flight health check fails or the graph
    /// cannot be read; everything past that degrades gracefully and is
    /// accounted for in the report.
    pub async fn run(&self, graph: Arc<dyn GraphSource>) -> Result<PipelineReport> {
        let run_id = Uuid::new_v4();
        info!("pipeline run {run_id} starting");

        info!("checking connection to the document store");
        match self.store.ping().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(PipelineError::Connectivity(
                    "health check returned false".to_string(),
                ))
            }
            Err(e) => return Err(PipelineError::Connectivity(e.to_string())),
        }

        let submitter = Arc::new(Submitter::new(self.store.clone()));
        let mut report = PipelineReport {
            run_id,
            raw_documents: 0,
            rule_documents: 0,
            batches_submitted: 0,
            batches_failed: 0,
            worker_faults: 0,
        };

        // Wave A: raw extraction over one shared cursor.
        let vertices: Vec<Vertex> = graph.vertices()?.collect();
        let worker_count = self.config.worker_count.max(1);
        info!(
            "raw extraction of {} vertices using {} workers",
            vertices.len(),
            worker_count
        );
        let cursor = Arc::new(VertexCursor::new(vertices));

        let mut wave = JoinSet::new();
        for worker in 0..worker_count {
            let sink = self.sink(format!("raw-worker-{worker}"), &submitter);
            wave.spawn(raw_worker(
                cursor.clone(),
                sink,
                self.config.raw_index_prefix.clone(),
            ));
        }
        report.raw_documents = self.join_wave(wave, &mut report.worker_faults).await;
        info!(
            "raw extraction complete, {} documents ingested",
            report.raw_documents
        );

        // Wave B: one worker per rule, started only once Wave A is done.
        info!(
            "rule extraction using {} rules, one worker per rule",
            self.registry.len()
        );
        let mut wave = JoinSet::new();
        for (slot, rule) in self.registry.rules().iter().enumerate() {
            let sink = self.sink(format!("rule-worker-{slot}"), &submitter);
            wave.spawn(rule_worker(
                rule.clone(),
                graph.clone(),
                sink,
                self.config.object_index_prefix.clone(),
            ));
        }
        report.rule_documents = self.join_wave(wave, &mut report.worker_faults).await;
        info!(
            "rule extraction complete, {} documents ingested",
            report.rule_documents
        );

        report.batches_submitted = submitter.batches_submitted();
        report.batches_failed = submitter.batches_failed();

        info!("closing document store");
        if let Err(e) = self.store.close().await {
            warn!("error closing document store: {e}");
        }

        info!(
            "pipeline run {} finished: {} raw documents, {} rule documents, {} batches submitted, {} batches failed, {} worker faults",
            run_id,
            report.raw_documents,
            report.rule_documents,
            report.batches_submitted,
            report.batches_failed,
            report.worker_faults
        );
        Ok(report)
    }

    fn sink(&self, name: String, submitter: &Arc<Submitter>) -> BulkSink {
        BulkSink::new(
            name,
            submitter.clone(),
            self.estimator.clone(),
            self.config.batch_threshold_bytes,
        )
    }

    /// Wait for every worker in a wave, summing ingested counts and
    /// counting faults. A faulted worker abandons its remaining input only.
    async fn join_wave(&self, mut wave: JoinSet<u64>, faults: &mut u64) -> u64 {
        let mut ingested = 0u64;
        while let Some(joined) = wave.join_next().await {
            match joined {
                Ok(count) => ingested += count,
                Err(e) => {
                    *faults += 1;
                    error!("uncaught fault in pipeline worker: {e}");
                }
            }
        }
        ingested
    }
}

/// Wave A worker: claims vertices off the shared cursor until it is
/// exhausted. Vertices without properties are not extracted.
async fn raw_worker(cursor: Arc<VertexCursor>, mut sink: BulkSink, index_prefix: String) -> u64 {
    let name = sink.name().to_string();
    while let Some(vertex) = cursor.claim() {
        if !vertex.has_properties() {
            continue;
        }

        let mut fields = PropertyMap::new();
        fields.insert(ORIGINAL_ID_FIELD.to_string(), Value::from(vertex.id));
        fields.extend(vertex.properties.clone());

        let index = format!("{}{}", index_prefix, vertex.label).to_lowercase();
        let doc_type = format!("raw_{}", vertex.label);
        sink.add(Document::new(index, doc_type, fields)).await;
    }

    let ingested = sink.close().await;
    info!("{name} has finished ingesting {ingested} raw documents");
    ingested
}

/// Wave B worker: drains one rule's document sequence into its own sink.
async fn rule_worker(
    rule: Arc<dyn TransformRule>,
    graph: Arc<dyn GraphSource>,
    mut sink: BulkSink,
    index_prefix: String,
) -> u64 {
    let name = sink.name().to_string();
    let index = format!("{}{}", index_prefix, rule.index()).to_lowercase();
    let doc_type = rule.doc_type().to_string();

    let documents = rule.transform(graph.as_ref());
    for fields in documents {
        sink.add(Document::new(index.clone(), doc_type.clone(), fields))
            .await;
    }

    let ingested = sink.close().await;
    info!("{name} has finished ingesting {ingested} documents for index {index}");
    ingested
}
