//! End-to-end pipeline tests over the in-memory graph and document store.

use graphlift_graph::{GraphSource, GraphTarget, MemoryGraph, PropertyMap, Value};
use graphlift_pipeline::{
    PipelineConfig, PipelineCoordinator, PipelineError, RuleRegistry, TransformRule,
    ORIGINAL_ID_FIELD,
};
use graphlift_store::{Document, MemoryDocumentStore, SizeEstimator};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn props(entries: &[(&str, Value)]) -> PropertyMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A graph with three people (two with email addresses), one place, and one
/// property-less marker vertex.
fn sample_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    let alice = graph
        .create_vertex(
            "Person",
            props(&[
                ("name", Value::from("alice")),
                ("email", Value::from("alice@example.com")),
            ]),
        )
        .unwrap();
    let bob = graph
        .create_vertex(
            "Person",
            props(&[
                ("name", Value::from("bob")),
                ("email", Value::from("bob@example.com")),
            ]),
        )
        .unwrap();
    let carol = graph
        .create_vertex("Person", props(&[("name", Value::from("carol"))]))
        .unwrap();
    graph
        .create_vertex("Place", props(&[("city", Value::from("london"))]))
        .unwrap();
    graph.create_vertex("Marker", PropertyMap::new()).unwrap();

    graph
        .create_edge("knows", alice, bob, PropertyMap::new())
        .unwrap();
    graph
        .create_edge("knows", bob, carol, PropertyMap::new())
        .unwrap();
    graph
}

/// Extracts one document per vertex carrying an `email` property.
struct EmailRule;

impl TransformRule for EmailRule {
    fn transform<'a>(
        &'a self,
        graph: &'a dyn GraphSource,
    ) -> Box<dyn Iterator<Item = PropertyMap> + Send + 'a> {
        let vertices = match graph.vertices() {
            Ok(iter) => iter,
            Err(_) => return Box::new(std::iter::empty()),
        };
        Box::new(vertices.filter_map(|vertex| {
            let address = vertex.properties.get("email")?.clone();
            let mut fields = PropertyMap::new();
            fields.insert("address".to_string(), address);
            if let Some(name) = vertex.properties.get("name") {
                fields.insert("owner".to_string(), name.clone());
            }
            Some(fields)
        }))
    }

    fn index(&self) -> &str {
        "Emails"
    }

    fn doc_type(&self) -> &str {
        "email"
    }
}

/// Produces nothing, successfully.
struct BarrenRule;

impl TransformRule for BarrenRule {
    fn transform<'a>(
        &'a self,
        _graph: &'a dyn GraphSource,
    ) -> Box<dyn Iterator<Item = PropertyMap> + Send + 'a> {
        Box::new(std::iter::empty())
    }

    fn index(&self) -> &str {
        "barren"
    }

    fn doc_type(&self) -> &str {
        "nothing"
    }
}

/// Panics as soon as its sequence is drained.
struct ExplodingRule;

impl TransformRule for ExplodingRule {
    fn transform<'a>(
        &'a self,
        _graph: &'a dyn GraphSource,
    ) -> Box<dyn Iterator<Item = PropertyMap> + Send + 'a> {
        Box::new(std::iter::once(()).map(|_| -> PropertyMap { panic!("rule blew up") }))
    }

    fn index(&self) -> &str {
        "exploding"
    }

    fn doc_type(&self) -> &str {
        "never"
    }
}

fn is_raw(document: &Document) -> bool {
    document.doc_type.starts_with("raw_")
}

#[tokio::test]
async fn test_full_run_extracts_raw_and_rule_documents() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(EmailRule));

    let coordinator = PipelineCoordinator::new(store.clone(), registry).with_config(PipelineConfig {
        worker_count: 3,
        raw_index_prefix: "raw-".to_string(),
        object_index_prefix: "obj-".to_string(),
        ..PipelineConfig::default()
    });

    let report = coordinator.run(Arc::new(sample_graph())).await.unwrap();

    // Four vertices carry properties; the Marker vertex is excluded.
    assert_eq!(report.raw_documents, 4);
    assert_eq!(report.rule_documents, 2);
    assert_eq!(report.worker_faults, 0);
    assert_eq!(report.batches_failed, 0);
    assert_eq!(report.batches_submitted as usize, store.submission_count());

    let documents = store.documents();
    let raw: Vec<&Document> = documents.iter().filter(|d| is_raw(d)).collect();
    let derived: Vec<&Document> = documents.iter().filter(|d| !is_raw(d)).collect();

    assert_eq!(raw.len(), 4);
    assert!(raw
        .iter()
        .all(|d| d.field(ORIGINAL_ID_FIELD).is_some()));
    assert!(raw
        .iter()
        .filter(|d| d.doc_type == "raw_Person")
        .all(|d| d.index == "raw-person"));
    assert!(raw
        .iter()
        .any(|d| d.index == "raw-place" && d.doc_type == "raw_Place"));

    assert_eq!(derived.len(), 2);
    assert!(derived
        .iter()
        .all(|d| d.index == "obj-emails" && d.doc_type == "email"));
    assert!(derived
        .iter()
        .any(|d| d.field("address") == Some(&Value::from("alice@example.com"))));

    assert!(store.is_closed());
}

#[tokio::test]
async fn test_wave_a_completes_before_wave_b_submits() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(EmailRule));

    let coordinator = PipelineCoordinator::new(store.clone(), registry).with_config(PipelineConfig {
        worker_count: 4,
        ..PipelineConfig::default()
    });
    coordinator.run(Arc::new(sample_graph())).await.unwrap();

    // Batches are recorded in submission order; once a rule batch shows up,
    // no raw batch may follow.
    let batches = store.batches();
    let first_rule_batch = batches
        .iter()
        .position(|batch| batch.iter().any(|d| !is_raw(d)))
        .expect("no rule batch recorded");
    for (position, batch) in batches.iter().enumerate() {
        if batch.iter().any(is_raw) {
            assert!(
                position < first_rule_batch,
                "raw batch at {position} after first rule batch at {first_rule_batch}"
            );
        }
    }
}

#[tokio::test]
async fn test_small_threshold_splits_batches() {
    init_tracing();

    /// Flat one-byte estimate, so a two-byte threshold flushes after every
    /// second document.
    struct FlatEstimator;

    impl SizeEstimator for FlatEstimator {
        fn estimate(&self, _document: &Document) -> usize {
            1
        }
    }

    let store = Arc::new(MemoryDocumentStore::new());
    let coordinator = PipelineCoordinator::new(store.clone(), RuleRegistry::new())
        .with_config(PipelineConfig {
            worker_count: 1,
            batch_threshold_bytes: 2,
            ..PipelineConfig::default()
        })
        .with_estimator(Arc::new(FlatEstimator));

    let report = coordinator.run(Arc::new(sample_graph())).await.unwrap();

    assert_eq!(report.raw_documents, 4);
    // Two full batches of two documents each from the single worker.
    assert_eq!(store.submission_count(), 2);
    assert!(store.batches().iter().all(|batch| batch.len() == 2));
}

#[tokio::test]
async fn test_rule_with_no_documents_completes_cleanly() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(BarrenRule));

    let coordinator = PipelineCoordinator::new(store.clone(), registry);
    let report = coordinator.run(Arc::new(sample_graph())).await.unwrap();

    assert_eq!(report.rule_documents, 0);
    assert_eq!(report.worker_faults, 0);
    assert!(store.is_closed());
}

#[tokio::test]
async fn test_panicking_rule_only_loses_its_own_output() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(ExplodingRule));
    registry.register(Arc::new(EmailRule));

    let coordinator = PipelineCoordinator::new(store.clone(), registry);
    let report = coordinator.run(Arc::new(sample_graph())).await.unwrap();

    assert_eq!(report.worker_faults, 1);
    assert_eq!(report.rule_documents, 2);
    assert!(store
        .documents()
        .iter()
        .any(|d| d.doc_type == "email"));
    assert!(store.is_closed());
}

#[tokio::test]
async fn test_failed_submissions_are_counted_not_fatal() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    store.fail_bulk(true);

    let coordinator = PipelineCoordinator::new(store.clone(), RuleRegistry::new())
        .with_config(PipelineConfig {
            worker_count: 1,
            ..PipelineConfig::default()
        });

    let report = coordinator.run(Arc::new(sample_graph())).await.unwrap();

    // The worker still drained its input; every batch was dropped.
    assert_eq!(report.raw_documents, 4);
    assert_eq!(report.batches_submitted, 0);
    assert_eq!(report.batches_failed, 1);
    assert_eq!(store.submission_count(), 0);
}

#[tokio::test]
async fn test_empty_graph_produces_no_submissions() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::new());
    let coordinator = PipelineCoordinator::new(store.clone(), RuleRegistry::new());

    let report = coordinator.run(Arc::new(MemoryGraph::new())).await.unwrap();

    assert_eq!(report.raw_documents, 0);
    assert_eq!(report.batches_submitted, 0);
    assert!(store.is_closed());
}

#[tokio::test]
async fn test_unreachable_store_aborts_run() {
    init_tracing();

    let store = Arc::new(MemoryDocumentStore::unreachable());
    let mut registry = RuleRegistry::new();
    registry.register(Arc::new(EmailRule));

    let coordinator = PipelineCoordinator::new(store.clone(), registry);
    let err = coordinator
        .run(Arc::new(sample_graph()))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Connectivity(_)));
    assert_eq!(store.submission_count(), 0);
    assert!(!store.is_closed());
}
