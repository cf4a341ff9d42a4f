//! Store adapters.
//!
//! Only the in-memory recording adapter ships here; adapters over real
//! document store clients live with the embedder.

pub mod memory;

pub use memory::MemoryDocumentStore;
