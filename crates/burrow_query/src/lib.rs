//! Set-intersection queries over Burrow component storages.
//!
//! This crate provides:
//! - [`Shape`] - The component tuple a view yields
//! - [`View`] - A query: shape plus `with`/`without` membership filters
//! - [`ViewIter`] - Single-pass iteration over the matches
//! - [`ViewMut`] - Mutable traversal: one `&mut` primary plus a shared shape
//!
//! The engine picks the smallest must-have storage as the driving
//! sequence and intersects the rest by membership checks, so iteration
//! cost scales with the rarest component, not the world size.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod shape;
pub mod view;

pub use shape::Shape;
pub use view::{View, ViewIter, ViewMut};
