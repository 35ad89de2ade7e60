//! Entity identifiers and error types for Burrow.
//!
//! This crate provides:
//! - [`Entity`] - Packed generational entity identifiers
//! - [`Error`] - Error types shared across the workspace
//!
//! Everything else (storages, signals, queries) lives in the layer crates
//! that build on these types.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;

pub use entity::{Entity, GENERATION_MASK, INDEX_BITS, INDEX_MASK, MAX_INDEX};
pub use error::{Error, ErrorKind, Result};
