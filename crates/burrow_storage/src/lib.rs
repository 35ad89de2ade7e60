//! Entity allocation, sparse-set component storage, signals, and the world
//! facade for Burrow.
//!
//! This crate provides:
//! - [`Entities`] - Generational entity allocation with an in-place free list
//! - [`SparseSet`] - Packed per-type component storage
//! - [`Signal`] - Lifecycle notification for storage events
//! - [`Registry`] - Type-indexed directory of type-erased storages
//! - [`World`] - The facade external callers touch
//! - [`Resources`] - Type-indexed singleton store (boundary collaborator)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod registry;
pub mod resource;
pub mod signal;
pub mod sparse;
pub mod world;

pub use allocator::Entities;
pub use registry::{ComponentId, ErasedStorage, Registry};
pub use resource::Resources;
pub use signal::{Signal, SubscriberId};
pub use sparse::SparseSet;
pub use world::{EntityMut, World};
