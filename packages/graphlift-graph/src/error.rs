//! Error types for graphlift-graph.

use crate::model::ElementId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    VertexNotFound(ElementId),

    #[error("graph is closed")]
    Closed,

    #[error("graph backend error: {0}")]
    Backend(String),
}

impl GraphError {
    pub fn backend<E: std::fmt::Display>(e: E) -> Self {
        Self::Backend(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::VertexNotFound(ElementId::new(9));
        assert_eq!(err.to_string(), "vertex not found: 9");

        assert_eq!(GraphError::Closed.to_string(), "graph is closed");
    }

    #[test]
    fn test_backend_constructor() {
        let err = GraphError::backend("connection reset");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(GraphError::Closed)
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(GraphError::Closed)));
    }
}
