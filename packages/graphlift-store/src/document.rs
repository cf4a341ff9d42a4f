//! Flat documents destined for the document store.

use graphlift_graph::{PropertyMap, Value};
use serde::{Deserialize, Serialize};

/// A flat key to value document addressed to one (index, type) target.
///
/// Documents are append-only ingestion units: they carry no identity of
/// their own and are never upserted. Fields reuse the graph crate's closed
/// [`Value`] set, so a document always serializes to a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Destination index name, already prefixed and lowercased by the caller.
    pub index: String,
    /// Destination document type.
    pub doc_type: String,
    /// Flat field map.
    pub fields: PropertyMap,
}

impl Document {
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        fields: PropertyMap,
    ) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
