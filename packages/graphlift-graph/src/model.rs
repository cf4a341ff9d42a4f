//! Core property graph entities: identities, vertices and edges.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Store-assigned identity of a vertex or edge.
///
/// Identities are opaque to callers: they are issued by the graph that owns
/// the element and carry no meaning beyond equality and lookup. Copying a
/// graph never reuses them; the target graph issues fresh ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ElementId> for Value {
    fn from(id: ElementId) -> Self {
        Value::Integer(id.as_u64() as i64)
    }
}

/// Key to value mapping attached to a vertex or edge.
///
/// Ordered so iteration and serialization are deterministic. A key is either
/// present with a concrete [`Value`] or absent; null is not representable.
pub type PropertyMap = BTreeMap<String, Value>;

/// A labelled vertex with its property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: ElementId,
    pub label: String,
    pub properties: PropertyMap,
}

impl Vertex {
    pub fn new(id: ElementId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_properties(
        id: ElementId,
        label: impl Into<String>,
        properties: PropertyMap,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            properties,
        }
    }

    /// Whether the vertex carries at least one property.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }
}

/// A labelled, directed edge between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: ElementId,
    pub label: String,
    /// Identity of the vertex the edge points out of.
    pub source: ElementId,
    /// Identity of the vertex the edge points into.
    pub target: ElementId,
    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(
        id: ElementId,
        label: impl Into<String>,
        source: ElementId,
        target: ElementId,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            source,
            target,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_properties(
        id: ElementId,
        label: impl Into<String>,
        source: ElementId,
        target: ElementId,
        properties: PropertyMap,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            source,
            target,
            properties,
        }
    }
}
