//! Output shapes: the component tuples a view yields.
//!
//! A [`Shape`] is an ordered list of component types. It declares which
//! storages a view must intersect and fetches the reference tuple for one
//! entity. The unit shape `()` requests no components at all, which turns
//! a view into a plain filtered entity iterator.

use burrow_foundation::Entity;
use burrow_storage::{ComponentId, World};

/// An ordered, duplicate-free list of component types a view yields.
///
/// Implemented for `()` and for tuples of up to four component types.
/// Every yielded item is a tuple of shared references into the dense
/// value arrays of the matching storages.
pub trait Shape {
    /// The reference tuple produced for one matching entity.
    type Item<'w>;

    /// The component ids of every type in the shape, in declaration order.
    ///
    /// Ids are assigned on first request, so this never fails; a type
    /// whose storage was never created simply matches no entities.
    fn component_ids(world: &World) -> Vec<ComponentId>;

    /// Fetches the reference tuple for one entity, or `None` when any
    /// storage lacks the entity.
    fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>>;
}

impl Shape for () {
    type Item<'w> = ();

    fn component_ids(_world: &World) -> Vec<ComponentId> {
        Vec::new()
    }

    fn fetch(_world: &World, _entity: Entity) -> Option<Self::Item<'_>> {
        Some(())
    }
}

macro_rules! impl_shape_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: 'static),+> Shape for ($($name,)+) {
            type Item<'w> = ($(&'w $name,)+);

            fn component_ids(world: &World) -> Vec<ComponentId> {
                vec![$(world.registry().component_id::<$name>()),+]
            }

            fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>> {
                Some(($(world.registry().pool::<$name>()?.get(entity)?,)+))
            }
        }
    };
}

impl_shape_for_tuple!(A);
impl_shape_for_tuple!(A, B);
impl_shape_for_tuple!(A, B, C);
impl_shape_for_tuple!(A, B, C, D);
