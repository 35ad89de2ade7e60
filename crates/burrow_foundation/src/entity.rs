//! Entity identifiers packed as (index, generation) pairs.
//!
//! An [`Entity`] is a single integer: the low bits hold an index into
//! entity storage, the high bits hold a generation counter that increments
//! when the index is reused after destruction. The split is derived from
//! the target pointer width.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of bits in the index field.
#[cfg(target_pointer_width = "64")]
pub const INDEX_BITS: u32 = 32;
/// Number of bits in the generation field.
#[cfg(target_pointer_width = "64")]
pub const GENERATION_BITS: u32 = 32;

/// Number of bits in the index field.
#[cfg(target_pointer_width = "32")]
pub const INDEX_BITS: u32 = 20;
/// Number of bits in the generation field.
#[cfg(target_pointer_width = "32")]
pub const GENERATION_BITS: u32 = 12;

/// Mask covering the index field of a packed entity.
pub const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Mask covering the generation field (after shifting the index away).
///
/// Generations wrap through this mask rather than overflowing.
pub const GENERATION_MASK: u64 = (1 << GENERATION_BITS) - 1;

/// Exclusive upper bound of the usable index range.
///
/// The all-ones index is reserved as the null sentinel and is never issued,
/// so valid indices are `[0, MAX_INDEX)`.
pub const MAX_INDEX: u64 = INDEX_MASK;

/// Entity identifier with a generational index for stale reference detection.
///
/// Two entities are equal iff both index and generation match; an index's
/// generation identifies which incarnation of that slot is alive.
///
/// # Layout
/// - low [`INDEX_BITS`] bits: index into entity storage
/// - high [`GENERATION_BITS`] bits: generation counter
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Creates an entity from an index and a generation.
    ///
    /// Both fields are masked to their bit widths.
    #[must_use]
    pub const fn new(index: u64, generation: u64) -> Self {
        Self((index & INDEX_MASK) | ((generation & GENERATION_MASK) << INDEX_BITS))
    }

    /// Returns the sentinel value representing "no entity".
    ///
    /// The null entity carries the reserved all-ones index, which is never
    /// allocated.
    #[must_use]
    pub const fn null() -> Self {
        Self(INDEX_MASK)
    }

    /// Returns true if this is the null sentinel.
    ///
    /// Only the index is inspected; the generation bits are ignored.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index() == INDEX_MASK
    }

    /// Returns the index field.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0 & INDEX_MASK
    }

    /// Returns the generation field.
    #[must_use]
    pub const fn generation(self) -> u64 {
        (self.0 >> INDEX_BITS) & GENERATION_MASK
    }

    /// Returns the raw packed representation.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Reconstructs an entity from its raw packed representation.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & (INDEX_MASK | (GENERATION_MASK << INDEX_BITS)))
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.index(), self.generation())
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.index())
        }
    }
}
