//! Integration tests for the world facade
//!
//! Tests boundary validation and the interplay of entity lifetime with
//! component storage.

use burrow::foundation::{Entity, ErrorKind};
use burrow::storage::World;

#[derive(Debug, PartialEq, Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, PartialEq)]
struct Name(&'static str);

#[test]
fn never_created_entity_is_not_found() {
    let mut world = World::new();
    let phantom = Entity::new(99, 0);

    assert!(!world.is_valid(phantom));
    assert!(matches!(
        world.insert(phantom, Name("ghost")).unwrap_err().kind,
        ErrorKind::EntityNotFound(_)
    ));
}

#[test]
fn components_are_independent_per_type() {
    let mut world = World::new();
    let e = world.create().unwrap();
    world.insert(e, Position { x: 1, y: 2 }).unwrap();
    world.insert(e, Name("hero")).unwrap();

    assert!(world.remove::<Position>(e).unwrap());
    assert!(world.contains::<Name>(e));
    assert_eq!(world.get::<Name>(e).unwrap(), &Name("hero"));
}

#[test]
fn duplicate_insert_preserves_the_original() {
    let mut world = World::new();
    let e = world.create().unwrap();
    world.insert(e, Name("first")).unwrap();

    let err = world.insert(e, Name("second")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentAlreadyPresent { .. }));
    assert_eq!(world.get::<Name>(e).unwrap(), &Name("first"));
}

#[test]
fn destroy_then_recreate_yields_a_clean_slate() {
    let mut world = World::new();
    let old = world.create().unwrap();
    world.insert(old, Position { x: 5, y: 5 }).unwrap();
    world.insert(old, Name("old")).unwrap();
    world.destroy(old).unwrap();

    let fresh = world.create().unwrap();
    assert_eq!(fresh.index(), old.index());
    assert_ne!(fresh, old);
    assert!(!world.contains::<Position>(fresh));
    assert!(!world.contains::<Name>(fresh));

    // The stale handle stays dead even though the index is live again.
    assert!(!world.is_valid(old));
    assert!(matches!(
        world.get::<Name>(old).unwrap_err().kind,
        ErrorKind::StaleEntity(_)
    ));
}

#[test]
fn destroying_twice_is_an_error() {
    let mut world = World::new();
    let e = world.create().unwrap();
    world.destroy(e).unwrap();
    assert!(world.destroy(e).is_err());
}

#[test]
fn create_at_round_trips_through_the_facade() {
    let mut world = World::new();
    let target = Entity::new(4, 2);
    assert_eq!(world.create_at(target).unwrap(), target);

    world.insert(target, Name("pinned")).unwrap();
    assert_eq!(world.get::<Name>(target).unwrap(), &Name("pinned"));
}

#[test]
fn count_reflects_per_type_population() {
    let mut world = World::new();
    for i in 0..6 {
        let e = world.create().unwrap();
        world.insert(e, Position { x: i, y: 0 }).unwrap();
        if i % 2 == 0 {
            world.insert(e, Name("even")).unwrap();
        }
    }

    assert_eq!(world.count::<Position>(), 6);
    assert_eq!(world.count::<Name>(), 3);
    assert_eq!(world.count::<u8>(), 0);
}

#[test]
fn spawn_composes_with_plain_operations() {
    let mut world = World::new();
    let e = world
        .spawn()
        .unwrap()
        .insert(Position { x: 0, y: 0 })
        .unwrap()
        .id();

    world.patch::<Position>(e, |p| p.x = 9).unwrap();
    assert_eq!(world.get::<Position>(e).unwrap(), &Position { x: 9, y: 0 });
}

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        Destroy(usize),
        Tag(usize, i32),
        Untag(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Create),
            (0usize..32).prop_map(Op::Destroy),
            (0usize..32, any::<i32>()).prop_map(|(i, v)| Op::Tag(i, v)),
            (0usize..32).prop_map(Op::Untag),
        ]
    }

    proptest! {
        /// The world agrees with a plain model under arbitrary
        /// create/destroy/tag churn. Indices into the model pick among
        /// currently alive entities.
        #[test]
        fn world_matches_model(ops in prop::collection::vec(op_strategy(), 1..150)) {
            let mut world = World::new();
            let mut alive: Vec<Entity> = Vec::new();
            let mut tags: HashMap<Entity, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Create => {
                        alive.push(world.create().unwrap());
                    }
                    Op::Destroy(i) if !alive.is_empty() => {
                        let e = alive.swap_remove(i % alive.len());
                        world.destroy(e).unwrap();
                        tags.remove(&e);
                    }
                    Op::Tag(i, v) if !alive.is_empty() => {
                        let e = alive[i % alive.len()];
                        if tags.contains_key(&e) {
                            prop_assert!(world.insert(e, v).is_err());
                        } else {
                            world.insert(e, v).unwrap();
                            tags.insert(e, v);
                        }
                    }
                    Op::Untag(i) if !alive.is_empty() => {
                        let e = alive[i % alive.len()];
                        let removed = world.remove::<i32>(e).unwrap();
                        prop_assert_eq!(removed, tags.remove(&e).is_some());
                    }
                    _ => {}
                }

                prop_assert_eq!(world.alive_count(), alive.len());
                prop_assert_eq!(world.count::<i32>(), tags.len());
                for (e, v) in &tags {
                    prop_assert_eq!(world.get::<i32>(*e).unwrap(), v);
                }
            }
        }
    }
}
