//! Error types for graphlift-transform.

use graphlift_graph::{ElementId, GraphError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("edge {edge} references vertex {endpoint} with no identity mapping; edge phase aborted")]
    EdgePhaseAborted { edge: ElementId, endpoint: ElementId },
}
