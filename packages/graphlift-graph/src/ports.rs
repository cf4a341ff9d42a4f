//! Port traits for graph capabilities.
//!
//! The domain defines the interfaces; adapters implement them. The in-memory
//! adapter lives in [`crate::memory`]; adapters for real graph stores are
//! supplied by embedders, along with connection establishment, which is out
//! of scope here.

use crate::error::Result;
use crate::model::{Edge, ElementId, PropertyMap, Vertex};

/// Read capability over a property graph.
///
/// Iteration order is whatever the backing store yields; callers must not
/// rely on it.
pub trait GraphSource: Send + Sync {
    /// Iterate all vertices.
    fn vertices(&self) -> Result<Box<dyn Iterator<Item = Vertex> + Send + '_>>;

    /// Iterate all edges.
    fn edges(&self) -> Result<Box<dyn Iterator<Item = Edge> + Send + '_>>;

    /// Look up a single vertex by identity.
    fn vertex(&self, id: ElementId) -> Result<Option<Vertex>>;
}

/// Write capability over a property graph.
///
/// Identities are issued by the target on creation; callers never pick them.
pub trait GraphTarget: Send {
    /// Create a vertex and return its assigned identity.
    fn create_vertex(&mut self, label: &str, properties: PropertyMap) -> Result<ElementId>;

    /// Create an edge between two existing vertices and return its assigned
    /// identity. Fails with [`crate::GraphError::VertexNotFound`] if either
    /// endpoint is absent.
    fn create_edge(
        &mut self,
        label: &str,
        source: ElementId,
        target: ElementId,
        properties: PropertyMap,
    ) -> Result<ElementId>;

    /// Flush pending writes to the backing store.
    fn commit(&mut self) -> Result<()>;

    /// Release the underlying connection. Further operations fail with
    /// [`crate::GraphError::Closed`].
    fn close(&mut self) -> Result<()>;
}
