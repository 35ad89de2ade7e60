//! Integration tests for entity allocation
//!
//! Tests generational recycling, free-list behavior, and the
//! caller-supplied identifier variant.

use burrow::foundation::{Entity, ErrorKind};
use burrow::storage::Entities;

#[test]
fn immediate_recycle_bumps_generation() {
    let mut entities = Entities::new();
    let e1 = entities.create().unwrap();
    entities.destroy(e1).unwrap();

    let e2 = entities.create().unwrap();
    assert_eq!(e2.index(), e1.index());
    assert_eq!(e2.generation(), e1.generation() + 1);
}

#[test]
fn destroying_the_middle_of_three_keeps_the_accounting() {
    let mut entities = Entities::new();
    let _e0 = entities.create().unwrap();
    let e1 = entities.create().unwrap();
    let _e2 = entities.create().unwrap();

    entities.destroy(e1).unwrap();
    assert_eq!(entities.alive_count(), 2);
    assert!(!entities.is_valid(Entity::new(1, 0)));

    let recreated = entities.create().unwrap();
    assert_eq!(recreated, Entity::new(1, 1));
    assert_eq!(entities.alive_count(), 3);
}

#[test]
fn stale_handles_never_validate() {
    let mut entities = Entities::new();
    let e = entities.create().unwrap();
    entities.destroy(e).unwrap();
    let recycled = entities.create().unwrap();

    assert!(!entities.is_valid(e));
    assert!(entities.is_valid(recycled));
    assert!(matches!(
        entities.validate(e).unwrap_err().kind,
        ErrorKind::StaleEntity(_)
    ));
}

#[test]
fn deep_churn_keeps_the_chain_consistent() {
    let mut entities = Entities::new();
    let mut alive = Vec::new();

    for round in 0..10 {
        for _ in 0..20 {
            alive.push(entities.create().unwrap());
        }
        // Drop every third survivor.
        let mut i = 0;
        alive.retain(|e| {
            i += 1;
            if i % 3 == 0 {
                entities.destroy(*e).unwrap();
                false
            } else {
                true
            }
        });
        assert_eq!(entities.alive_count(), alive.len(), "round {round}");
    }

    for e in &alive {
        assert!(entities.is_valid(*e));
    }
}

#[test]
fn create_at_recreates_a_specific_entity() {
    let mut entities = Entities::new();
    let target = Entity::new(7, 3);

    let created = entities.create_at(target).unwrap();
    assert_eq!(created, target);
    assert!(entities.is_valid(target));

    // All synthesized indices below are immediately recyclable.
    for _ in 0..7 {
        let filler = entities.create().unwrap();
        assert!(filler.index() < 7);
        assert_eq!(filler.generation(), 0);
    }
}

#[test]
fn create_at_existing_entity_is_a_no_op() {
    let mut entities = Entities::new();
    let e = entities.create().unwrap();

    let same = entities.create_at(Entity::new(e.index(), 42)).unwrap();
    assert_eq!(same, e);
    assert_eq!(entities.alive_count(), 1);
}
