//! Entity allocation with an in-place free list.
//!
//! [`Entities`] issues and retires entity identifiers. The free list is
//! stored inside the already-allocated slot array: a dead slot packs the
//! index of the next free slot together with the generation to assign when
//! its own index is next recycled. Memory overhead is exactly one
//! entity-sized word per index regardless of churn.

// Allow u64 to usize casts - indices fit the pointer width by construction
#![allow(clippy::cast_possible_truncation)]

use burrow_foundation::{Entity, Error, GENERATION_MASK, MAX_INDEX, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Issues and retires entity identifiers with generational recycling.
///
/// # Invariants
/// - `slots[i]` is either the alive entity occupying index `i`
///   (`slots[i].index() == i`) or a free-list link packing the next free
///   index and the generation pending for `i`.
/// - The free chain starting at `free_head` is cycle-free and terminates at
///   the null entity; every index below `slots.len()` is alive or appears
///   in the chain exactly once.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entities {
    /// Alive entities and free-list links, indexed by entity index.
    slots: Vec<Entity>,
    /// First free slot, or null when the free list is empty.
    free_head: Entity,
}

impl Default for Entities {
    fn default() -> Self {
        Self::new()
    }
}

impl Entities {
    /// Creates a new empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: Entity::null(),
        }
    }

    /// Creates a new entity.
    ///
    /// Pops the head of the free list when one is available, preserving the
    /// generation stored in the recycled slot; otherwise appends a fresh
    /// slot at generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::CapacityExhausted`](burrow_foundation::ErrorKind::CapacityExhausted)
    /// once every usable index is occupied. The allocator never wraps or
    /// reuses a live index.
    pub fn create(&mut self) -> Result<Entity> {
        if self.free_head.is_null() {
            let index = self.slots.len() as u64;
            if index >= MAX_INDEX {
                return Err(Error::capacity_exhausted(MAX_INDEX));
            }
            let entity = Entity::new(index, 0);
            self.slots.push(entity);
            Ok(entity)
        } else {
            let index = self.free_head.index();
            let link = self.slots[index as usize];
            let entity = Entity::new(index, link.generation());
            self.free_head = Entity::new(link.index(), 0);
            self.slots[index as usize] = entity;
            Ok(entity)
        }
    }

    /// Creates an entity at a caller-supplied identifier.
    ///
    /// Used to deterministically re-create a specific entity:
    /// - a never-seen index first synthesizes and releases every
    ///   intermediate never-seen index below it (at generation 0), so the
    ///   slot array has no shallow holes;
    /// - a currently-free index is unlinked out of the middle of the free
    ///   chain and revived with the requested generation;
    /// - an alive index returns the existing entity unchanged.
    ///
    /// # Errors
    ///
    /// Returns a capacity error when the requested index falls in the
    /// reserved range (the null index or beyond).
    pub fn create_at(&mut self, entity: Entity) -> Result<Entity> {
        let index = entity.index();
        if index >= MAX_INDEX {
            return Err(Error::capacity_exhausted(MAX_INDEX));
        }

        // Synthesize intermediate never-seen indices, immediately released.
        while (self.slots.len() as u64) < index {
            let filler = self.slots.len() as u64;
            self.slots.push(Entity::new(self.free_head.index(), 0));
            self.free_head = Entity::new(filler, 0);
        }

        if (self.slots.len() as u64) == index {
            let created = Entity::new(index, entity.generation());
            self.slots.push(created);
            return Ok(created);
        }

        let link = self.slots[index as usize];
        if link.index() == index {
            // Already alive; the existing incarnation wins.
            return Ok(link);
        }

        // Currently free: unlink from the chain.
        if self.free_head.index() == index {
            self.free_head = Entity::new(link.index(), 0);
        } else {
            let mut prev = self.free_head.index();
            loop {
                let next = self.slots[prev as usize].index();
                if next == index {
                    break;
                }
                prev = next;
            }
            let pending = self.slots[prev as usize].generation();
            self.slots[prev as usize] = Entity::new(link.index(), pending);
        }

        let revived = Entity::new(index, entity.generation());
        self.slots[index as usize] = revived;
        Ok(revived)
    }

    /// Destroys an entity, pushing its index back onto the free list.
    ///
    /// The slot records the next generation, `(g + 1)` wrapped through
    /// [`GENERATION_MASK`], so the index recycles at the successor
    /// generation. Callers are responsible for removing the entity from
    /// component storages first (the [`World`](crate::World) facade does).
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or was never created.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.validate(entity)?;

        let index = entity.index();
        let next_generation = (entity.generation() + 1) & GENERATION_MASK;
        self.slots[index as usize] = Entity::new(self.free_head.index(), next_generation);
        self.free_head = Entity::new(index, 0);
        Ok(())
    }

    /// Checks if an entity is currently alive.
    ///
    /// True iff the index is in range and the slot holds exactly this
    /// entity (index and generation both).
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| *slot == entity)
    }

    /// Validates that an entity is alive.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for an index that was never allocated and
    /// `StaleEntity` for a destroyed or reused incarnation.
    pub fn validate(&self, entity: Entity) -> Result<()> {
        match self.slots.get(entity.index() as usize) {
            None => Err(Error::entity_not_found(entity)),
            Some(slot) if *slot == entity => Ok(()),
            Some(_) => Err(Error::stale_entity(entity)),
        }
    }

    /// Returns the number of currently alive entities.
    ///
    /// Computed as the slot count minus the length of the free chain.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        let mut free = 0usize;
        let mut cursor = self.free_head;
        while !cursor.is_null() {
            free += 1;
            cursor = Entity::new(self.slots[cursor.index() as usize].index(), 0);
        }
        self.slots.len() - free
    }

    /// Returns the total number of slots ever allocated, alive or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over all currently alive entities, in index order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(index, slot)| slot.index() as usize == *index)
            .map(|(_, slot)| *slot)
    }
}
