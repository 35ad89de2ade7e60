//! Integration tests for views
//!
//! Tests query set algebra over larger, unevenly populated worlds, where
//! the smallest-storage driving choice actually matters.

use burrow::foundation::Entity;
use burrow::query::{View, ViewMut};
use burrow::storage::World;

#[derive(Debug, PartialEq)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, PartialEq)]
struct Velocity {
    dx: i32,
    dy: i32,
}

#[derive(Debug)]
struct Rare(u32);

struct Disabled;

/// 100 entities: all have Position, every other has Velocity, every
/// twentieth has Rare, every fifth is Disabled.
fn populated_world() -> (World, Vec<Entity>) {
    let mut world = World::new();
    let mut entities = Vec::new();
    for i in 0..100 {
        let e = world.create().unwrap();
        world.insert(e, Position { x: i, y: -i }).unwrap();
        if i % 2 == 0 {
            world.insert(e, Velocity { dx: 1, dy: 0 }).unwrap();
        }
        if i % 20 == 0 {
            world.insert(e, Rare(i as u32)).unwrap();
        }
        if i % 5 == 0 {
            world.insert(e, Disabled).unwrap();
        }
        entities.push(e);
    }
    (world, entities)
}

#[test]
fn pair_view_is_the_exact_intersection() {
    let (world, entities) = populated_world();

    let matched: Vec<_> = View::<(Position, Velocity)>::new(&world)
        .iter()
        .map(|(e, _)| e)
        .collect();

    assert_eq!(matched.len(), 50);
    for e in &matched {
        assert!(entities.contains(e));
        assert_eq!(e.index() % 2, 0);
    }
}

#[test]
fn rare_component_drives_a_wide_pair() {
    let (world, _) = populated_world();

    // Rare has 5 members; the traversal must touch no more candidates
    // than that, and yields their full shapes.
    let matched: Vec<_> = View::<(Position, Rare)>::new(&world).iter().collect();
    assert_eq!(matched.len(), 5);
    for (entity, (position, rare)) in &matched {
        assert_eq!(entity.index() % 20, 0);
        assert_eq!(position.x as u32, rare.0);
    }
}

#[test]
fn with_and_without_compose() {
    let (world, _) = populated_world();

    // Velocity holders that are not disabled: even indices minus
    // multiples of 10.
    let matched: Vec<_> = View::<(Position,)>::new(&world)
        .with::<Velocity>()
        .without::<Disabled>()
        .iter()
        .map(|(e, _)| e)
        .collect();

    assert_eq!(matched.len(), 40);
    for e in &matched {
        assert_eq!(e.index() % 2, 0);
        assert_ne!(e.index() % 10, 0);
    }
}

#[test]
fn shape_order_does_not_change_the_result_set() {
    let (world, _) = populated_world();

    let mut a: Vec<_> = View::<(Position, Velocity)>::new(&world)
        .iter()
        .map(|(e, _)| e.index())
        .collect();
    let mut b: Vec<_> = View::<(Velocity, Position)>::new(&world)
        .iter()
        .map(|(e, _)| e.index())
        .collect();

    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[test]
fn three_way_shape_fetches_all_references() {
    let (world, _) = populated_world();

    let matched: Vec<_> = View::<(Position, Velocity, Rare)>::new(&world)
        .iter()
        .collect();

    // Rare members all sit at even indices, so Velocity never filters.
    assert_eq!(matched.len(), 5);
    for (_, (position, velocity, rare)) in &matched {
        assert_eq!(position.x as u32, rare.0);
        assert_eq!(velocity.dx, 1);
    }
}

#[test]
fn destroyed_entities_disappear_from_views() {
    let (mut world, entities) = populated_world();

    for e in entities.iter().take(10) {
        world.destroy(*e).unwrap();
    }

    let matched: Vec<_> = View::<(Position,)>::new(&world)
        .iter()
        .map(|(e, _)| e)
        .collect();
    assert_eq!(matched.len(), 90);
    for e in &matched {
        assert!(e.index() >= 10);
    }
}

#[test]
fn removed_components_disappear_from_views() {
    let (mut world, entities) = populated_world();

    world.remove::<Velocity>(entities[0]).unwrap();

    let matched = View::<(Position, Velocity)>::new(&world).iter().count();
    assert_eq!(matched, 49);
}

#[test]
fn empty_world_yields_nothing() {
    let world = World::new();
    assert_eq!(View::<(Position,)>::new(&world).iter().count(), 0);
    assert_eq!(View::<()>::new(&world).iter().count(), 0);
}

#[test]
fn mutable_traversal_updates_values_in_one_pass() {
    let (mut world, entities) = populated_world();

    ViewMut::<Position, (Velocity,)>::new(&mut world)
        .for_each(|_, position, (velocity,)| position.x += velocity.dx);

    // Velocity holders (even indices) advanced by dx = 1, the rest held.
    for (i, e) in entities.iter().enumerate() {
        let expected = if i % 2 == 0 { i as i32 + 1 } else { i as i32 };
        assert_eq!(world.get::<Position>(*e).unwrap().x, expected, "entity {i}");
    }
}

#[test]
fn mutable_traversal_respects_without_filters() {
    let (mut world, entities) = populated_world();

    ViewMut::<Position>::new(&mut world)
        .without::<Disabled>()
        .for_each(|_, position, ()| position.y = 0);

    for (i, e) in entities.iter().enumerate() {
        let expected = if i % 5 == 0 { -(i as i32) } else { 0 };
        assert_eq!(world.get::<Position>(*e).unwrap().y, expected, "entity {i}");
    }
}

#[test]
fn duplicate_filter_registration_is_harmless() {
    let (world, _) = populated_world();

    // Repeating a with-filter must not change the result.
    let matched = View::<(Position,)>::new(&world)
        .with::<Velocity>()
        .with::<Velocity>()
        .iter()
        .count();
    assert_eq!(matched, 50);
}
