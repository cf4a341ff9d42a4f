//! Pluggable extraction rules and their registry.

use graphlift_graph::{GraphSource, PropertyMap};
use std::sync::Arc;
use tracing::{info, warn};

/// A pluggable extraction policy deriving flat documents from a graph.
///
/// Rules are independent, stateless producers: the pipeline assumes no
/// ordering between them and runs each on its own worker. A rule yields a
/// finite sequence of field maps; the pipeline addresses them to
/// `<object prefix><index()>` with the rule's declared type.
pub trait TransformRule: Send + Sync {
    /// Derive this rule's documents from the graph.
    fn transform<'a>(
        &'a self,
        graph: &'a dyn GraphSource,
    ) -> Box<dyn Iterator<Item = PropertyMap> + Send + 'a>;

    /// Index name this rule's output belongs in, before prefixing.
    fn index(&self) -> &str;

    /// Document type associated with this rule's output.
    fn doc_type(&self) -> &str;
}

/// Explicit registry of the rules a pipeline run will execute.
///
/// Rules are registered at startup by the embedder, replacing any runtime
/// discovery mechanism: the pipeline only ever consumes this finite,
/// already-constructed set.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn TransformRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: Arc<dyn TransformRule>) -> &mut Self {
        info!("registered transform rule for index {}", rule.index());
        self.rules.push(rule);
        self
    }

    /// Register the outcome of a fallible rule constructor.
    ///
    /// A constructor failure is logged and skipped; it never fails the
    /// pipeline, the remaining rules run as usual.
    pub fn register_outcome(&mut self, outcome: anyhow::Result<Arc<dyn TransformRule>>) -> &mut Self {
        match outcome {
            Ok(rule) => {
                self.register(rule);
            }
            Err(e) => {
                warn!("skipping transform rule that could not be constructed: {e}");
            }
        }
        self
    }

    pub fn rules(&self) -> &[Arc<dyn TransformRule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct NullRule;

    impl TransformRule for NullRule {
        fn transform<'a>(
            &'a self,
            _graph: &'a dyn GraphSource,
        ) -> Box<dyn Iterator<Item = PropertyMap> + Send + 'a> {
            Box::new(std::iter::empty())
        }

        fn index(&self) -> &str {
            "null"
        }

        fn doc_type(&self) -> &str {
            "nothing"
        }
    }

    #[test]
    fn test_register() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(NullRule));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rules()[0].index(), "null");
    }

    #[test]
    fn test_register_outcome_skips_failures() {
        let mut registry = RuleRegistry::new();
        registry
            .register_outcome(Ok(Arc::new(NullRule)))
            .register_outcome(Err(anyhow!("missing configuration")))
            .register_outcome(Ok(Arc::new(NullRule)));

        assert_eq!(registry.len(), 2);
    }
}
