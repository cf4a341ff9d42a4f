//! In-memory property graph adapter.

use crate::error::{GraphError, Result};
use crate::model::{Edge, ElementId, PropertyMap, Vertex};
use crate::ports::{GraphSource, GraphTarget};
use std::collections::BTreeMap;

/// An in-memory graph implementing both the source and target ports.
///
/// Identities are issued sequentially from a single counter shared by
/// vertices and edges. Commit is a no-op; close marks the graph unusable.
/// Intended for tests and for embedders that stage a graph in memory before
/// handing it to a transform.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    vertices: BTreeMap<ElementId, Vertex>,
    edges: BTreeMap<ElementId, Edge>,
    next_id: u64,
    closed: bool,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(GraphError::Closed);
        }
        Ok(())
    }

    fn issue_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId::new(self.next_id)
    }
}

impl GraphSource for MemoryGraph {
    fn vertices(&self) -> Result<Box<dyn Iterator<Item = Vertex> + Send + '_>> {
        self.ensure_open()?;
        Ok(Box::new(self.vertices.values().cloned()))
    }

    fn edges(&self) -> Result<Box<dyn Iterator<Item = Edge> + Send + '_>> {
        self.ensure_open()?;
        Ok(Box::new(self.edges.values().cloned()))
    }

    fn vertex(&self, id: ElementId) -> Result<Option<Vertex>> {
        self.ensure_open()?;
        Ok(self.vertices.get(&id).cloned())
    }
}

impl GraphTarget for MemoryGraph {
    fn create_vertex(&mut self, label: &str, properties: PropertyMap) -> Result<ElementId> {
        self.ensure_open()?;
        let id = self.issue_id();
        self.vertices
            .insert(id, Vertex::with_properties(id, label, properties));
        Ok(id)
    }

    fn create_edge(
        &mut self,
        label: &str,
        source: ElementId,
        target: ElementId,
        properties: PropertyMap,
    ) -> Result<ElementId> {
        self.ensure_open()?;
        if !self.vertices.contains_key(&source) {
            return Err(GraphError::VertexNotFound(source));
        }
        if !self.vertices.contains_key(&target) {
            return Err(GraphError::VertexNotFound(target));
        }
        let id = self.issue_id();
        self.edges.insert(
            id,
            Edge::with_properties(id, label, source, target, properties),
        );
        Ok(id)
    }

    fn commit(&mut self) -> Result<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
