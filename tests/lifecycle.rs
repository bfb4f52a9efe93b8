mod common;

use common::{dna, WorldBuilder};
use phyta_data::{DeathCause, Decision, Position, WorldEvent};

#[test]
fn test_homeostasis_in_barren_cell_dies_after_one_tick() {
    let (mut world, ids) = WorldBuilder::new()
        .with_richness(0.0)
        .with_plant(dna(1, &[Decision::Homeostasis], &[0]), 4, 4)
        .build();

    let report = world.tick();
    assert_organism_dead!(world, ids[0]);
    assert_population!(world, 0);
    assert_eq!(report.deaths, 1);
    assert!(matches!(
        report.events[0],
        WorldEvent::Destroyed {
            cause: DeathCause::Exhausted,
            tick: 0,
            ..
        }
    ));
}

#[test]
fn test_decision_cycle_wraps() {
    let (mut world, ids) = WorldBuilder::new()
        .with_richness(5.0)
        .without_mutation()
        .with_plant(dna(3, &[Decision::Invest, Decision::Homeostasis], &[0]), 2, 2)
        .build();
    let id = ids[0];

    world.tick();
    let plant = world.organism(id).unwrap();
    assert_eq!((plant.vitality, plant.energy, plant.turn), (2, 2, 1));

    world.tick();
    let plant = world.organism(id).unwrap();
    assert_eq!((plant.vitality, plant.energy, plant.turn), (2, 2, 2));
    assert_eq!(plant.reproductive_turn, 0);

    // Third turn invests again and crosses the gate; brood size 0.
    world.tick();
    let plant = world.organism(id).unwrap();
    assert_eq!((plant.vitality, plant.energy, plant.turn), (1, 4, 3));
    assert_eq!(plant.reproductive_turn, 1);
    assert_population!(world, 1);

    world.tick();
    assert_organism_alive!(world, id);
    assert_eq!(world.organism(id).unwrap().vitality, 1);
}

#[test]
fn test_offspring_wait_for_next_tick() {
    let (mut world, ids) = WorldBuilder::new()
        .with_richness(5.0)
        .without_mutation()
        .with_plant(dna(1, &[Decision::Invest], &[2]), 5, 5)
        .build();

    let report = world.tick();
    assert_organism_dead!(world, ids[0]);
    assert_eq!(report.births, 2);
    assert_eq!(report.stepped, 1);
    for child in world.organisms() {
        assert_eq!(child.turn, 0);
        assert_eq!(child.vitality, 1);
        assert_eq!(child.energy, 0);
        assert_eq!(child.dna, dna(1, &[Decision::Invest], &[2]));
        assert!(child.position.x.abs_diff(5) <= 1 && child.position.y.abs_diff(5) <= 1);
    }
    assert_consistent!(world);
}

#[test]
fn test_takeover_evicts_weak_occupant() {
    let (mut world, ids) = WorldBuilder::new()
        .with_size(1, 2)
        .with_richness(1.0)
        .without_mutation()
        .with_plant(dna(2, &[Decision::Homeostasis], &[0]), 1, 0)
        .with_plant(dna(9, &[Decision::Invest], &[1]), 0, 0)
        .build();
    let (weak, strong) = (ids[0], ids[1]);

    let report = world.tick();
    assert_organism_dead!(world, weak);
    assert_organism_alive!(world, strong);
    assert_population!(world, 2);
    assert!(report.events.iter().any(|e| matches!(
        e,
        WorldEvent::Destroyed { id, cause: DeathCause::Displaced, .. } if *id == weak
    )));
    let child = world.occupant(Position::new(1, 0)).unwrap();
    assert_eq!(child.longevity(), 9);
    assert_eq!(world.organism(strong).unwrap().energy, 1);
    assert_consistent!(world);
}

#[test]
fn test_takeover_blocked_by_sturdy_occupant() {
    let (mut world, ids) = WorldBuilder::new()
        .with_size(1, 2)
        .with_richness(1.0)
        .without_mutation()
        .with_plant(dna(4, &[Decision::Homeostasis], &[0]), 1, 0)
        .with_plant(dna(9, &[Decision::Invest], &[1]), 0, 0)
        .build();

    let report = world.tick();
    assert_organism_alive!(world, ids[0]);
    assert_eq!(report.births, 0);
    assert_eq!(report.crowded, 1);
    // The brood was paid for even though it could not be placed.
    assert_eq!(world.organism(ids[1]).unwrap().energy, 1);
}

#[test]
fn test_displaced_organism_is_skipped_in_same_tick() {
    // The weak plant has the higher id, so it is displaced before its turn.
    let (mut world, ids) = WorldBuilder::new()
        .with_size(1, 2)
        .with_richness(1.0)
        .without_mutation()
        .with_plant(dna(9, &[Decision::Invest], &[1]), 0, 0)
        .with_plant(dna(2, &[Decision::Homeostasis], &[0]), 1, 0)
        .build();

    let report = world.tick();
    assert_organism_dead!(world, ids[1]);
    assert_eq!(report.stepped, 1);
    assert!(report.errors.is_empty());
}
