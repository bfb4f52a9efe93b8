use phyta_core::config::AppConfig;
use phyta_core::World;

fn run(seed: u64, ticks: usize) -> (Vec<usize>, World) {
    let mut config = AppConfig::default();
    config.world.rows = 40;
    config.world.cols = 40;
    config.world.seed = Some(seed);

    let mut world = World::new(config).unwrap();
    for _ in 0..5 {
        world.seed_template().unwrap();
    }
    let trajectory = (0..ticks).map(|_| world.tick().population).collect();
    (trajectory, world)
}

#[test]
fn test_determinism_consistency() {
    let (traj1, world1) = run(12345, 60);
    let (traj2, world2) = run(12345, 60);

    assert_eq!(traj1, traj2, "Population trajectories should match");
    assert_eq!(
        world1.organisms(),
        world2.organisms(),
        "Organism state should match"
    );
    assert_eq!(world1.environment(), world2.environment());
    assert_eq!(world1.config().fingerprint(), world2.config().fingerprint());
}

#[test]
fn test_seed_changes_environment() {
    let (_, world1) = run(1, 0);
    let (_, world2) = run(2, 0);
    assert_ne!(world1.environment(), world2.environment());
}
