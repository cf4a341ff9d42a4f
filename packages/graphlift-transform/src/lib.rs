//! Identity-remapping graph to graph transformer.
//!
//! Copying a graph into another store cannot reuse identities: the target
//! issues its own. [`RemapTransformer`] copies structure in two strictly
//! ordered phases (all vertices first, building an [`IdentityMap`]; then all
//! edges, resolved through that map) so referential integrity survives the
//! remap. Inclusion policies decide what is copied; a [`GapPolicy`] decides
//! what happens to edges whose endpoints were not retained.
//!
//! This is a single-threaded entry point, independent of the bulk document
//! pipeline.

pub mod error;
pub mod identity_map;
pub mod remap;

pub use error::{Result, TransformError};
pub use identity_map::IdentityMap;
pub use remap::{GapPolicy, RemapReport, RemapTransformer, ORIGINAL_ID_PROPERTY};
