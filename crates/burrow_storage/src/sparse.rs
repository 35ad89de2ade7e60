//! Sparse-set component storage.
//!
//! One [`SparseSet`] exists per component type: a dense array of entities,
//! a parallel dense array of values, and a sparse array mapping entity
//! index to dense position. Removal swaps the last dense element into the
//! vacated slot, so the dense arrays stay contiguous and removal is O(1).

// Allow u64 to usize casts - indices fit the pointer width by construction
#![allow(clippy::cast_possible_truncation)]

use std::any::type_name;

use burrow_foundation::{Entity, Error, Result};

use crate::signal::Signal;

/// Sentinel marking an index with no dense entry.
const ABSENT: u32 = u32::MAX;

/// Packed storage for one component type.
///
/// # Invariants
/// - `dense` and `values` have the same length and index correspondence.
/// - For every dense position `k`, `sparse[dense[k].index()] == k`.
/// - For every index `i` with `sparse[i] != ABSENT`,
///   `dense[sparse[i]].index() == i`.
///
/// Membership is tracked by entity index only, never generation: the
/// allocator is responsible for keeping stale handles away from storages.
#[derive(Debug)]
pub struct SparseSet<T> {
    /// Entity index -> dense position, `ABSENT` where vacant.
    sparse: Vec<u32>,
    /// Entities in packed order.
    dense: Vec<Entity>,
    /// Values in packed order, parallel to `dense`.
    values: Vec<T>,
    on_construct: Signal<T>,
    on_update: Signal<T>,
    on_remove: Signal<T>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            values: Vec::new(),
            on_construct: Signal::new(),
            on_update: Signal::new(),
            on_remove: Signal::new(),
        }
    }

    /// Inserts a component for an entity and fires the construct signal.
    ///
    /// The returned borrow points into the dense array and is invalidated
    /// by any later mutation of this storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity already has an entry here.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<&mut T> {
        if self.contains(entity) {
            return Err(Error::component_already_present(entity, type_name::<T>()));
        }

        let index = entity.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, ABSENT);
        }

        let position = self.dense.len();
        self.sparse[index] = position as u32;
        self.dense.push(entity);
        self.values.push(value);

        self.on_construct.emit(entity, &mut self.values[position]);
        Ok(&mut self.values[position])
    }

    /// Removes an entity's component.
    ///
    /// Fires the remove signal with the current value before any mutation,
    /// then swap-and-pops both dense arrays and rewrites the sparse entry
    /// of the element that was moved. Returns false if the entity has no
    /// entry.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(position) = self.position(entity) else {
            return false;
        };

        let stored = self.dense[position];
        self.on_remove.emit(stored, &mut self.values[position]);

        self.dense.swap_remove(position);
        self.values.swap_remove(position);
        self.sparse[stored.index() as usize] = ABSENT;

        if position < self.dense.len() {
            let moved = self.dense[position];
            self.sparse[moved.index() as usize] = position as u32;
        }
        true
    }

    /// Returns the component for an entity, if present.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.position(entity).map(|position| &self.values[position])
    }

    /// Returns a mutable borrow of the component for an entity, if present.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.position(entity)
            .map(|position| &mut self.values[position])
    }

    /// Mutates the stored value in place, then fires the update signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity has no entry here.
    pub fn patch(&mut self, entity: Entity, mutate: impl FnOnce(&mut T)) -> Result<()> {
        let Some(position) = self.position(entity) else {
            return Err(Error::component_not_found(entity, type_name::<T>()));
        };

        mutate(&mut self.values[position]);
        let stored = self.dense[position];
        self.on_update.emit(stored, &mut self.values[position]);
        Ok(())
    }

    /// Swaps in a new value, fires the update signal, and returns the old
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity has no entry here.
    pub fn replace(&mut self, entity: Entity, value: T) -> Result<T> {
        let Some(position) = self.position(entity) else {
            return Err(Error::component_not_found(entity, type_name::<T>()));
        };

        let old = std::mem::replace(&mut self.values[position], value);
        let stored = self.dense[position];
        self.on_update.emit(stored, &mut self.values[position]);
        Ok(old)
    }

    /// Checks membership by entity index.
    ///
    /// The generation is deliberately not compared; see the type docs.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.position(entity).is_some()
    }

    /// Drops every entry, resetting all three arrays.
    ///
    /// Deliberately silent: no per-entity remove signal fires. Subscribers
    /// that need teardown notifications must remove entries individually.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.values.clear();
    }

    /// Returns the number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the packed entity array.
    ///
    /// This is the driving sequence the query engine iterates.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.dense
    }

    /// Returns the packed value array.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the packed value array mutably.
    ///
    /// Bypasses the update signal, like [`get_mut`](Self::get_mut).
    #[must_use]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterates entity/value pairs in packed order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.dense.iter().copied().zip(self.values.iter())
    }

    /// Iterates entity/value pairs in packed order, values mutably.
    ///
    /// This is the safe bulk-mutation path for a single storage.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.dense.iter().copied().zip(self.values.iter_mut())
    }

    /// The signal fired after a component is inserted.
    pub fn on_construct(&mut self) -> &mut Signal<T> {
        &mut self.on_construct
    }

    /// The signal fired after a component is patched or replaced.
    pub fn on_update(&mut self) -> &mut Signal<T> {
        &mut self.on_update
    }

    /// The signal fired before a component is removed.
    pub fn on_remove(&mut self) -> &mut Signal<T> {
        &mut self.on_remove
    }

    fn position(&self, entity: Entity) -> Option<usize> {
        let position = *self.sparse.get(entity.index() as usize)?;
        (position != ABSENT).then_some(position as usize)
    }
}
