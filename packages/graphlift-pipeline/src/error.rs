//! Error types for graphlift-pipeline.

use graphlift_graph::GraphError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document store failed its pre-flight health check. Nothing was
    /// extracted or submitted.
    #[error("document store health check failed: {0}")]
    Connectivity(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}
