//! Type-indexed directory of type-erased component storages.
//!
//! Every component type gets a small integer [`ComponentId`], assigned
//! once per registry on first request. Storages are created lazily behind
//! those ids and held as [`ErasedStorage`] trait objects so the registry
//! can sweep, clear, and size them without static knowledge of `T`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use burrow_foundation::Entity;

use crate::sparse::SparseSet;

/// Per-type integer id, stable for the lifetime of its [`Registry`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Returns the id as a pool index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Assigns component ids via atomic fetch-and-increment on first lookup.
///
/// Assignment is thread-safe so concurrent first uses of distinct types
/// cannot collide; nothing else about the registry is. An id, once
/// assigned, is immutable for the registry's lifetime.
#[derive(Default)]
struct ComponentIds {
    next: AtomicUsize,
    assigned: Mutex<HashMap<TypeId, ComponentId>>,
}

impl ComponentIds {
    fn get<T: 'static>(&self) -> ComponentId {
        let mut assigned = self
            .assigned
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = assigned.get(&TypeId::of::<T>()) {
            return id;
        }
        let id = ComponentId(self.next.fetch_add(1, Ordering::Relaxed));
        assigned.insert(TypeId::of::<T>(), id);
        id
    }
}

/// Type-erased operation surface of a [`SparseSet`].
///
/// The registry operates on storages through this trait; typed access goes
/// through the [`Any`] up-casts, which verify the type tag on downcast
/// before reinterpreting.
pub trait ErasedStorage {
    /// Checks membership by entity index.
    fn contains(&self, entity: Entity) -> bool;
    /// Removes an entity's entry; false if absent.
    fn remove(&mut self, entity: Entity) -> bool;
    /// Drops every entry.
    fn clear(&mut self);
    /// Returns the number of stored components.
    fn len(&self) -> usize;
    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool;
    /// Returns the packed entity array.
    fn entities(&self) -> &[Entity];
    /// Upcast for tag-checked typed access.
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for tag-checked typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Consuming upcast, for moving a boxed storage across the erasure.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: 'static> ErasedStorage for SparseSet<T> {
    fn contains(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        self.remove(entity)
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn entities(&self) -> &[Entity] {
        self.entities()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Directory of component storages, indexed by [`ComponentId`].
///
/// A slot stays empty until its type is first used with a mutable
/// operation, then permanently holds that type's storage. Storages are
/// never destroyed, only cleared.
#[derive(Default)]
pub struct Registry {
    ids: ComponentIds,
    pools: Vec<Option<Box<dyn ErasedStorage>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for a component type, assigning one on first use.
    pub fn component_id<T: 'static>(&self) -> ComponentId {
        self.ids.get::<T>()
    }

    /// Returns the storage for `T`, if it was ever created.
    #[must_use]
    pub fn pool<T: 'static>(&self) -> Option<&SparseSet<T>> {
        let id = self.ids.get::<T>();
        self.pools
            .get(id.index())?
            .as_deref()?
            .as_any()
            .downcast_ref()
    }

    /// Returns the storage for `T` mutably, if it was ever created.
    #[must_use]
    pub fn pool_mut<T: 'static>(&mut self) -> Option<&mut SparseSet<T>> {
        let id = self.ids.get::<T>();
        self.pools
            .get_mut(id.index())?
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut()
    }

    /// Returns the storage for `T`, creating it on first use.
    pub fn pool_or_insert<T: 'static>(&mut self) -> &mut SparseSet<T> {
        let id = self.ids.get::<T>();
        if id.index() >= self.pools.len() {
            self.pools.resize_with(id.index() + 1, || None);
        }
        let slot = &mut self.pools[id.index()];
        if slot.is_none() {
            *slot = Some(Box::new(SparseSet::<T>::new()));
        }
        match slot
            .as_deref_mut()
            .and_then(|pool| pool.as_any_mut().downcast_mut())
        {
            Some(pool) => pool,
            // Pools are keyed by a per-type id, so the tag always matches.
            None => unreachable!("component pool holds a foreign type"),
        }
    }

    /// Returns the type-erased storage behind an id, if created.
    #[must_use]
    pub fn erased(&self, id: ComponentId) -> Option<&dyn ErasedStorage> {
        self.pools.get(id.index())?.as_deref()
    }

    /// Detaches the storage for `T`, leaving its slot empty.
    ///
    /// Lets a caller hold one storage exclusively while the rest of the
    /// registry stays readable; mutable traversals are built on this.
    /// Hand the box back with [`attach_pool`](Self::attach_pool) when done,
    /// or the type reads as never created.
    pub fn detach_pool<T: 'static>(&mut self) -> Option<Box<SparseSet<T>>> {
        let id = self.ids.get::<T>();
        let pool = self.pools.get_mut(id.index())?.take()?;
        match pool.into_any().downcast() {
            Ok(pool) => Some(pool),
            // Pools are keyed by a per-type id, so the tag always matches.
            Err(_) => unreachable!("component pool holds a foreign type"),
        }
    }

    /// Reattaches a storage for `T` into its slot.
    pub fn attach_pool<T: 'static>(&mut self, pool: Box<SparseSet<T>>) {
        let id = self.ids.get::<T>();
        if id.index() >= self.pools.len() {
            self.pools.resize_with(id.index() + 1, || None);
        }
        self.pools[id.index()] = Some(pool);
    }

    /// Removes an entity from every storage that holds it.
    ///
    /// Runs on entity destruction; remove signals fire per storage.
    pub fn remove_all(&mut self, entity: Entity) {
        for pool in self.pools.iter_mut().flatten() {
            pool.remove(entity);
        }
    }

    /// Returns the number of storages ever created.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.iter().flatten().count()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("pools", &self.pool_count())
            .finish()
    }
}
