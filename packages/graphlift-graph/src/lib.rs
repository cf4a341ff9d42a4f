//! Property graph model and capability ports for graphlift.
//!
//! A property graph is a set of labelled vertices and directed labelled
//! edges, each carrying a key to value property map over a closed set of
//! primitive kinds. This crate defines:
//!
//! - the data model: [`Value`], [`ElementId`], [`PropertyMap`], [`Vertex`],
//!   [`Edge`];
//! - the capability ports: [`GraphSource`] (read) and [`GraphTarget`]
//!   (write), implemented by adapters;
//! - an in-memory adapter, [`MemoryGraph`], for tests and staging.
//!
//! Connecting to and authenticating against real graph stores is the
//! embedder's responsibility; this crate only defines the seams.

pub mod error;
pub mod memory;
pub mod model;
pub mod ports;
pub mod value;

pub use error::{GraphError, Result};
pub use memory::MemoryGraph;
pub use model::{Edge, ElementId, PropertyMap, Vertex};
pub use ports::{GraphSource, GraphTarget};
pub use value::Value;
