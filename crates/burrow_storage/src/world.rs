//! The world facade: allocator and registry composed behind one surface.
//!
//! [`World`] is thin delegation. Its one job beyond plumbing is entity
//! validation at the boundary: storages track membership by index alone
//! and trust their caller, so the facade refuses stale or unknown handles
//! before they reach a storage.

use burrow_foundation::{Entity, Error, Result};
use std::any::type_name;

use crate::allocator::Entities;
use crate::registry::Registry;
use crate::signal::Signal;

/// Composes the entity allocator and the storage registry.
#[derive(Debug, Default)]
pub struct World {
    entities: Entities,
    registry: Registry,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Entity lifecycle ---

    /// Creates a new entity.
    ///
    /// # Errors
    ///
    /// Returns a capacity error once the identifier space is exhausted.
    pub fn create(&mut self) -> Result<Entity> {
        self.entities.create()
    }

    /// Creates an entity at a caller-supplied identifier, for
    /// deterministic re-creation.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when the requested index is reserved.
    pub fn create_at(&mut self, entity: Entity) -> Result<Entity> {
        self.entities.create_at(entity)
    }

    /// Destroys an entity after removing it from every component storage
    /// that holds it (firing each storage's remove signal).
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or was never created.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.entities.validate(entity)?;
        self.registry.remove_all(entity);
        self.entities.destroy(entity)
    }

    /// Checks if an entity is currently alive.
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.entities.is_valid(entity)
    }

    /// Returns the number of currently alive entities.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Creates an entity and returns a builder scoped to it.
    ///
    /// # Errors
    ///
    /// Returns a capacity error once the identifier space is exhausted.
    pub fn spawn(&mut self) -> Result<EntityMut<'_>> {
        let entity = self.create()?;
        Ok(EntityMut {
            world: self,
            entity,
        })
    }

    // --- Components ---

    /// Inserts a component for an entity, creating the storage for `T` on
    /// first use. Fires the construct signal and returns a borrow of the
    /// stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive or already has a `T`.
    pub fn insert<T: 'static>(&mut self, entity: Entity, value: T) -> Result<&mut T> {
        self.entities.validate(entity)?;
        self.registry.pool_or_insert::<T>().insert(entity, value)
    }

    /// Removes an entity's `T` component. Returns false if it had none.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn remove<T: 'static>(&mut self, entity: Entity) -> Result<bool> {
        self.entities.validate(entity)?;
        Ok(self
            .registry
            .pool_mut::<T>()
            .is_some_and(|pool| pool.remove(entity)))
    }

    /// Returns the `T` component of an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive or has no `T`.
    pub fn get<T: 'static>(&self, entity: Entity) -> Result<&T> {
        self.entities.validate(entity)?;
        self.registry
            .pool::<T>()
            .and_then(|pool| pool.get(entity))
            .ok_or_else(|| Error::component_not_found(entity, type_name::<T>()))
    }

    /// Returns the `T` component of an entity mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive or has no `T`.
    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Result<&mut T> {
        self.entities.validate(entity)?;
        self.registry
            .pool_mut::<T>()
            .and_then(|pool| pool.get_mut(entity))
            .ok_or_else(|| Error::component_not_found(entity, type_name::<T>()))
    }

    /// Mutates an entity's `T` in place, then fires the update signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive or has no `T`.
    pub fn patch<T: 'static>(&mut self, entity: Entity, mutate: impl FnOnce(&mut T)) -> Result<()> {
        self.entities.validate(entity)?;
        match self.registry.pool_mut::<T>() {
            Some(pool) => pool.patch(entity, mutate),
            None => Err(Error::component_not_found(entity, type_name::<T>())),
        }
    }

    /// Swaps in a new `T`, fires the update signal, returns the old value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive or has no `T`.
    pub fn replace<T: 'static>(&mut self, entity: Entity, value: T) -> Result<T> {
        self.entities.validate(entity)?;
        match self.registry.pool_mut::<T>() {
            Some(pool) => pool.replace(entity, value),
            None => Err(Error::component_not_found(entity, type_name::<T>())),
        }
    }

    /// Checks whether an entity has a `T` component.
    ///
    /// False for stale or unknown handles: membership is reported only
    /// for the index's current incarnation, unlike the index-only check
    /// on [`SparseSet::contains`](crate::SparseSet::contains).
    #[must_use]
    pub fn contains<T: 'static>(&self, entity: Entity) -> bool {
        self.entities.is_valid(entity)
            && self
                .registry
                .pool::<T>()
                .is_some_and(|pool| pool.contains(entity))
    }

    /// Drops every `T` component. Silent: no remove signals fire.
    pub fn clear<T: 'static>(&mut self) {
        if let Some(pool) = self.registry.pool_mut::<T>() {
            pool.clear();
        }
    }

    /// Returns the number of stored `T` components.
    #[must_use]
    pub fn count<T: 'static>(&self) -> usize {
        self.registry.pool::<T>().map_or(0, crate::SparseSet::len)
    }

    // --- Signals ---

    /// The signal fired after a `T` is inserted.
    pub fn on_construct<T: 'static>(&mut self) -> &mut Signal<T> {
        self.registry.pool_or_insert::<T>().on_construct()
    }

    /// The signal fired after a `T` is patched or replaced.
    pub fn on_update<T: 'static>(&mut self) -> &mut Signal<T> {
        self.registry.pool_or_insert::<T>().on_update()
    }

    /// The signal fired before a `T` is removed.
    pub fn on_remove<T: 'static>(&mut self) -> &mut Signal<T> {
        self.registry.pool_or_insert::<T>().on_remove()
    }

    // --- Read access for the query layer ---

    /// The entity allocator.
    #[must_use]
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// The storage registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The storage registry, mutably.
    ///
    /// The query layer uses this to detach a storage for mutable
    /// traversal; most callers want the typed component operations above.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}

/// Fluent builder scoped to one freshly created or chosen entity.
///
/// A thin wrapper over the [`World`] operations; it adds no invariants of
/// its own.
#[derive(Debug)]
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityMut<'_> {
    /// The entity this builder operates on.
    #[must_use]
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// Inserts a component and returns the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity already has a `T`.
    pub fn insert<T: 'static>(self, value: T) -> Result<Self> {
        self.world.insert(self.entity, value)?;
        Ok(self)
    }

    /// Removes a component (if present) and returns the builder.
    pub fn remove<T: 'static>(self) -> Self {
        // The entity is alive by construction; validation cannot fail.
        let _ = self.world.remove::<T>(self.entity);
        self
    }

    /// Destroys the entity, consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity was already destroyed elsewhere.
    pub fn despawn(self) -> Result<()> {
        self.world.destroy(self.entity)
    }
}
