/// Asserts that the organism is no longer in the world.
#[macro_export]
macro_rules! assert_organism_dead {
    ($world:expr, $id:expr) => {
        assert!(
            $world.organism($id).is_none(),
            "Organism {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts that the organism is still in the world.
#[macro_export]
macro_rules! assert_organism_alive {
    ($world:expr, $id:expr) => {
        assert!(
            $world.organism($id).is_some(),
            "Organism {} should be alive",
            $id
        );
    };
}

/// Asserts that the live population matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.population(), $count, "Population count mismatch");
    };
}

/// Asserts registry and occupancy agree.
#[macro_export]
macro_rules! assert_consistent {
    ($world:expr) => {
        if let Err(e) = $world.check_invariants() {
            panic!("World inconsistent at tick {}: {}", $world.tick_count(), e);
        }
    };
}
