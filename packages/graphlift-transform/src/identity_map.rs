//! Source to target identity mapping.

use graphlift_graph::ElementId;
use std::collections::HashMap;

/// Mapping from source vertex identities to the identities the target graph
/// issued for their copies.
///
/// Built incrementally during the vertex phase and fully populated before
/// any edge is processed. Scoped to a single transform run and never
/// persisted; memory cost scales with the retained vertex count.
#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: HashMap<ElementId, ElementId>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source to target pair. Returns `false` if the source
    /// identity was already recorded; the existing entry is kept, so each
    /// source vertex holds exactly one entry.
    pub fn record(&mut self, source: ElementId, target: ElementId) -> bool {
        use std::collections::hash_map::Entry;
        match self.entries.entry(source) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(target);
                true
            }
        }
    }

    pub fn contains(&self, source: ElementId) -> bool {
        self.entries.contains_key(&source)
    }

    /// The target identity issued for `source`, if the vertex was retained.
    pub fn target_of(&self, source: ElementId) -> Option<ElementId> {
        self.entries.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
