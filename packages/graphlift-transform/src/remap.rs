//! Two-phase graph to graph copy with identity remapping.

use crate::error::{Result, TransformError};
use crate::identity_map::IdentityMap;
use graphlift_graph::{Edge, GraphSource, GraphTarget, Value, Vertex};
use tracing::{info, warn};

/// Property key under which the source identity is preserved on copies.
pub const ORIGINAL_ID_PROPERTY: &str = "originalId";

/// What to do when an edge endpoint has no entry in the identity map.
///
/// A missing entry means the endpoint was excluded by the vertex policy or
/// absent from the source snapshot the vertex phase saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Log a warning and drop the edge, then keep processing. Preserves the
    /// most data and is the default.
    #[default]
    SkipEdge,
    /// Stop the remaining edge phase with
    /// [`TransformError::EdgePhaseAborted`]. The target is left uncommitted.
    AbortEdgePhase,
}

/// Counters accumulated over one transform run.
///
/// `skipped` entries were excluded by an inclusion policy; `dropped` edges
/// lost an endpoint to the vertex policy and fell to the gap policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapReport {
    pub vertices_copied: u64,
    pub vertices_skipped: u64,
    pub edges_copied: u64,
    pub edges_skipped: u64,
    pub edges_dropped: u64,
}

type VertexPolicy = Box<dyn Fn(&Vertex) -> bool + Send + Sync>;
type EdgePolicy = Box<dyn Fn(&Edge) -> bool + Send + Sync>;

/// Copies a source graph into a target graph, issuing new identities.
///
/// This differs from a plain copy: the target issues fresh identities for
/// every element, with the source identity optionally preserved as an
/// `originalId` property. Referential integrity is kept through an
/// [`IdentityMap`] built during the vertex phase; the edge phase starts only
/// once that map is complete.
///
/// ```rust
/// use graphlift_graph::{GraphTarget, MemoryGraph, PropertyMap};
/// use graphlift_transform::RemapTransformer;
///
/// let mut source = MemoryGraph::new();
/// source.create_vertex("Person", PropertyMap::new()).unwrap();
///
/// let mut target = MemoryGraph::new();
/// let report = RemapTransformer::new()
///     .preserve_original_id(true)
///     .transform(&source, &mut target)
///     .unwrap();
/// assert_eq!(report.vertices_copied, 1);
/// ```
pub struct RemapTransformer {
    preserve_original_id: bool,
    gap_policy: GapPolicy,
    progress_interval: u64,
    vertex_policy: VertexPolicy,
    edge_policy: EdgePolicy,
}

impl Default for RemapTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl RemapTransformer {
    /// A transformer that accepts every vertex and edge. Original ids are
    /// not preserved and gap edges are skipped.
    pub fn new() -> Self {
        Self {
            preserve_original_id: false,
            gap_policy: GapPolicy::default(),
            progress_interval: 10_000,
            vertex_policy: Box::new(|_| true),
            edge_policy: Box::new(|_| true),
        }
    }

    /// Record each source identity as an `originalId` property on its copy.
    pub fn preserve_original_id(mut self, preserve: bool) -> Self {
        self.preserve_original_id = preserve;
        self
    }

    pub fn gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// Emit a progress log line every `interval` vertices and edges.
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Only vertices accepted by `policy` are copied. Rejected vertices get
    /// no identity map entry, so their edges fall to the gap policy.
    pub fn vertex_policy(
        mut self,
        policy: impl Fn(&Vertex) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.vertex_policy = Box::new(policy);
        self
    }

    /// Only edges accepted by `policy` are considered for copying.
    pub fn edge_policy(mut self, policy: impl Fn(&Edge) -> bool + Send + Sync + 'static) -> Self {
        self.edge_policy = Box::new(policy);
        self
    }

    /// Copy `source` into `target` and commit the target.
    ///
    /// Phase 1 copies vertices and builds the identity map; phase 2 copies
    /// edges and begins only after phase 1 has consumed the whole vertex
    /// iterator. Source iteration order carries no guarantee downstream.
    pub fn transform(
        &self,
        source: &dyn GraphSource,
        target: &mut dyn GraphTarget,
    ) -> Result<RemapReport> {
        let mut ids = IdentityMap::new();
        let mut report = RemapReport::default();

        info!("transforming vertices into the target graph");
        for vertex in source.vertices()? {
            if !(self.vertex_policy)(&vertex) {
                report.vertices_skipped += 1;
                continue;
            }
            if ids.contains(vertex.id) {
                warn!(
                    "source vertex {} yielded more than once, keeping the first copy",
                    vertex.id
                );
                continue;
            }

            let Vertex {
                id,
                label,
                mut properties,
            } = vertex;
            if self.preserve_original_id {
                properties.insert(ORIGINAL_ID_PROPERTY.to_string(), Value::from(id));
            }

            let issued = target.create_vertex(&label, properties)?;
            ids.record(id, issued);
            report.vertices_copied += 1;

            if report.vertices_copied % self.progress_interval == 0 {
                info!("{} vertices processed", report.vertices_copied);
            }
        }
        info!(
            "finished processing {} vertices ({} skipped)",
            report.vertices_copied, report.vertices_skipped
        );

        info!("transforming edges into the target graph");
        let mut edges_seen = 0u64;
        for edge in source.edges()? {
            edges_seen += 1;

            if (self.edge_policy)(&edge) {
                match (ids.target_of(edge.source), ids.target_of(edge.target)) {
                    (Some(source_id), Some(target_id)) => {
                        target.create_edge(&edge.label, source_id, target_id, edge.properties)?;
                        report.edges_copied += 1;
                    }
                    (mapped_source, _) => {
                        let endpoint = if mapped_source.is_none() {
                            edge.source
                        } else {
                            edge.target
                        };
                        match self.gap_policy {
                            GapPolicy::SkipEdge => {
                                warn!(
                                    "edge {} references vertex {} with no identity mapping, skipping",
                                    edge.id, endpoint
                                );
                                report.edges_dropped += 1;
                            }
                            GapPolicy::AbortEdgePhase => {
                                warn!(
                                    "edge {} references vertex {} with no identity mapping, aborting edge phase",
                                    edge.id, endpoint
                                );
                                return Err(TransformError::EdgePhaseAborted {
                                    edge: edge.id,
                                    endpoint,
                                });
                            }
                        }
                    }
                }
            } else {
                report.edges_skipped += 1;
            }

            if edges_seen % self.progress_interval == 0 {
                info!("{edges_seen} edges processed");
            }
        }
        info!(
            "finished processing {} edges ({} copied, {} skipped, {} dropped)",
            edges_seen, report.edges_copied, report.edges_skipped, report.edges_dropped
        );

        info!("committing target graph");
        target.commit()?;

        Ok(report)
    }
}
