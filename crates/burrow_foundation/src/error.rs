//! Error types for Burrow operations.
//!
//! Uses `thiserror` for ergonomic error definition. Operations on the world
//! facade validate entities and surface violations through these types;
//! interior storage operations trust their caller's preconditions instead
//! (see the storage crate).

use thiserror::Error;

use crate::entity::Entity;

/// Convenience alias for results carrying a Burrow [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Burrow operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(entity: Entity) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(entity: Entity) -> Self {
        Self::new(ErrorKind::StaleEntity(entity))
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a component already present error.
    #[must_use]
    pub fn component_already_present(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentAlreadyPresent { entity, component })
    }

    /// Creates an identifier capacity exhaustion error.
    #[must_use]
    pub fn capacity_exhausted(capacity: u64) -> Self {
        Self::new(ErrorKind::CapacityExhausted { capacity })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity index was never allocated or its slot is currently free.
    #[error("entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(Entity),

    /// Component not present on the entity.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// The component type name that was not found.
        component: &'static str,
    },

    /// Component already present on the entity.
    #[error("component already present: {component} on entity {entity:?}")]
    ComponentAlreadyPresent {
        /// The entity that was mutated.
        entity: Entity,
        /// The component type name that was already stored.
        component: &'static str,
    },

    /// The entity identifier space is exhausted.
    ///
    /// The allocator never silently wraps or reuses a live index; running
    /// out of indices is reported here instead.
    #[error("entity identifier space exhausted (capacity {capacity})")]
    CapacityExhausted {
        /// Total number of usable indices.
        capacity: u64,
    },
}
