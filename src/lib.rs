//! Burrow - Sparse-set entity-component storage engine
//!
//! This crate re-exports all layers of the Burrow system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: burrow_query      — views, shapes, membership filters
//! Layer 1: burrow_storage    — allocator, sparse sets, signals, world
//! Layer 0: burrow_foundation — core types (Entity, Error)
//! ```

pub use burrow_foundation as foundation;
pub use burrow_query as query;
pub use burrow_storage as storage;
