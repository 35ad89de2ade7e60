//! View construction and single-pass iteration.
//!
//! A [`View`] composes an output [`Shape`] with optional membership
//! filters, picks the cheapest driving storage, and iterates the matches.

use std::marker::PhantomData;

use burrow_foundation::Entity;
use burrow_storage::{ComponentId, World};

use crate::shape::Shape;

/// A query over the world: an output shape plus membership filters.
///
/// Matching is pure set algebra over storage membership: an entity matches
/// iff it is present in every shape and `with` storage and absent from
/// every `without` storage. Filter storages are never fetched from; only
/// their membership is consulted.
///
/// The view borrows the world immutably, so storages cannot be mutated
/// while any iterator over them is alive; single-pass value mutation goes
/// through [`ViewMut`] instead.
#[derive(Debug)]
pub struct View<'w, S: Shape> {
    world: &'w World,
    with: Vec<ComponentId>,
    without: Vec<ComponentId>,
    _shape: PhantomData<fn() -> S>,
}

impl<'w, S: Shape> View<'w, S> {
    /// Creates a view over the world with no extra filters.
    #[must_use]
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            with: Vec::new(),
            without: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Requires matches to also have a `T` component (without yielding it).
    #[must_use]
    pub fn with<T: 'static>(mut self) -> Self {
        self.with.push(self.world.registry().component_id::<T>());
        self
    }

    /// Requires matches to not have a `T` component.
    #[must_use]
    pub fn without<T: 'static>(mut self) -> Self {
        self.without.push(self.world.registry().component_id::<T>());
        self
    }

    /// Starts a single-pass traversal of the current matches.
    ///
    /// Every call re-evaluates storage sizes and the driving-set choice
    /// from scratch; the traversal itself is finite, forward-only, and
    /// yields no entity twice.
    #[must_use]
    pub fn iter(&self) -> ViewIter<'w, S> {
        // The full must-have set: output shape plus `with` filters.
        let mut must = S::component_ids(self.world);
        must.extend_from_slice(&self.with);
        must.sort_unstable();
        must.dedup();

        let driver = if must.is_empty() {
            // Nothing to intersect: every alive entity is a candidate.
            Driver::Alive(self.world.entities().iter().collect::<Vec<_>>().into_iter())
        } else {
            // Drive from the smallest must-have storage; every other
            // candidate set is a superset-or-equal search space.
            let registry = self.world.registry();
            let mut smallest: Option<(ComponentId, usize)> = None;
            let mut missing = false;
            for &id in &must {
                match registry.erased(id) {
                    None => {
                        missing = true;
                        break;
                    }
                    Some(pool) => {
                        if smallest.is_none_or(|(_, len)| pool.len() < len) {
                            smallest = Some((id, pool.len()));
                        }
                    }
                }
            }

            let entities: &'w [Entity] = match (missing, smallest) {
                // A must-have type with no storage matches nothing.
                (true, _) | (false, None) => &[],
                (false, Some((driving, _))) => {
                    must.retain(|&id| id != driving);
                    registry
                        .erased(driving)
                        .map_or(&[], |pool| pool.entities())
                }
            };
            Driver::Dense(entities.iter())
        };

        ViewIter {
            world: self.world,
            driver,
            must,
            without: self.without.clone(),
            _shape: PhantomData,
        }
    }
}

impl<'w, S: Shape> IntoIterator for &View<'w, S> {
    type Item = (Entity, S::Item<'w>);
    type IntoIter = ViewIter<'w, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'w, S: Shape> IntoIterator for View<'w, S> {
    type Item = (Entity, S::Item<'w>);
    type IntoIter = ViewIter<'w, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The driving sequence of candidate entities.
enum Driver<'w> {
    /// The dense entity array of the smallest must-have storage.
    Dense(std::slice::Iter<'w, Entity>),
    /// Every alive entity, snapshotted from the allocator.
    Alive(std::vec::IntoIter<Entity>),
}

/// Single-pass iterator over view matches.
///
/// Candidates failing any membership check are skipped eagerly.
pub struct ViewIter<'w, S: Shape> {
    world: &'w World,
    driver: Driver<'w>,
    /// Must-have storages still to check (the driver is excluded).
    must: Vec<ComponentId>,
    without: Vec<ComponentId>,
    _shape: PhantomData<fn() -> S>,
}

impl<'w, S: Shape> Iterator for ViewIter<'w, S> {
    type Item = (Entity, S::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entity = match &mut self.driver {
                Driver::Dense(entities) => *entities.next()?,
                Driver::Alive(entities) => entities.next()?,
            };

            let registry = self.world.registry();
            let has_all = self
                .must
                .iter()
                .all(|&id| registry.erased(id).is_some_and(|pool| pool.contains(entity)));
            if !has_all {
                continue;
            }
            let has_forbidden = self
                .without
                .iter()
                .any(|&id| registry.erased(id).is_some_and(|pool| pool.contains(entity)));
            if has_forbidden {
                continue;
            }

            if let Some(item) = S::fetch(self.world, entity) {
                return Some((entity, item));
            }
        }
    }
}

/// A mutable query: one primary component yielded `&mut A`, plus a shared
/// shape fetched alongside it.
///
/// The primary storage drives the traversal and is detached from the
/// registry for its duration, so the primary type must not recur in the
/// shared shape (such an entry fetches nothing and the view yields no
/// matches). Mutations through the yielded borrow are visible immediately;
/// they bypass the update signal, like
/// [`SparseSet::iter_mut`](burrow_storage::SparseSet::iter_mut).
#[derive(Debug)]
pub struct ViewMut<'w, A, S: Shape = ()> {
    world: &'w mut World,
    with: Vec<ComponentId>,
    without: Vec<ComponentId>,
    _shape: PhantomData<fn() -> (A, S)>,
}

impl<'w, A: 'static, S: Shape> ViewMut<'w, A, S> {
    /// Creates a mutable view over the world with no extra filters.
    #[must_use]
    pub fn new(world: &'w mut World) -> Self {
        Self {
            world,
            with: Vec::new(),
            without: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Requires matches to also have a `T` component (without yielding it).
    #[must_use]
    pub fn with<T: 'static>(mut self) -> Self {
        self.with.push(self.world.registry().component_id::<T>());
        self
    }

    /// Requires matches to not have a `T` component.
    #[must_use]
    pub fn without<T: 'static>(mut self) -> Self {
        self.without.push(self.world.registry().component_id::<T>());
        self
    }

    /// Runs `f` once per match, with the primary component borrowed
    /// mutably.
    ///
    /// Structural mutation is impossible while the traversal runs; the
    /// closure sees only the borrows it is handed.
    pub fn for_each(self, mut f: impl FnMut(Entity, &mut A, S::Item<'_>)) {
        let world = self.world;
        let primary_id = world.registry().component_id::<A>();
        // Excluding the primary type contradicts driving from it.
        if self.without.contains(&primary_id) {
            return;
        }
        let Some(mut primary) = world.registry_mut().detach_pool::<A>() else {
            return;
        };

        let mut must = S::component_ids(world);
        must.extend_from_slice(&self.with);
        must.sort_unstable();
        must.dedup();
        must.retain(|&id| id != primary_id);

        for (entity, value) in primary.iter_mut() {
            let registry = world.registry();
            let has_all = must
                .iter()
                .all(|&id| registry.erased(id).is_some_and(|pool| pool.contains(entity)));
            if !has_all {
                continue;
            }
            let has_forbidden = self
                .without
                .iter()
                .any(|&id| registry.erased(id).is_some_and(|pool| pool.contains(entity)));
            if has_forbidden {
                continue;
            }

            if let Some(item) = S::fetch(world, entity) {
                f(entity, value, item);
            }
        }

        world.registry_mut().attach_pool(primary);
    }
}
