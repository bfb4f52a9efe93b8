pub mod macros;

use phyta_core::config::{AppConfig, EnvironmentMode};
use phyta_core::{EnvironmentGrid, World};
use phyta_data::{Decision, Dna, OrganismId, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type EnvironmentFn = Box<dyn Fn(u32, u32) -> f64>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    plants: Vec<(Dna, Position)>,
    seed: u64,
    richness: Option<EnvironmentFn>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.rows = 10;
        config.world.cols = 10;
        config.environment.mode = EnvironmentMode::Uniform;
        Self {
            config,
            plants: Vec::new(),
            seed: 42,
            richness: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, rows: u32, cols: u32) -> Self {
        self.config.world.rows = rows;
        self.config.world.cols = cols;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Turns mutation off in practice: two draws from `[0, u64::MAX)` never collide.
    pub fn without_mutation(mut self) -> Self {
        self.config.evolution.mutation_chance = u64::MAX;
        self
    }

    pub fn with_richness(mut self, richness: f64) -> Self {
        self.richness = Some(Box::new(move |_, _| richness));
        self
    }

    pub fn with_richness_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, u32) -> f64 + 'static,
    {
        self.richness = Some(Box::new(f));
        self
    }

    pub fn with_plant(mut self, dna: Dna, x: u32, y: u32) -> Self {
        self.plants.push((dna, Position::new(x, y)));
        self
    }

    /// Builds the world and places the requested plants, in order.
    pub fn build(self) -> (World, Vec<OrganismId>) {
        let rows = self.config.world.rows;
        let cols = self.config.world.cols;
        let environment = match &self.richness {
            Some(f) => EnvironmentGrid::from_provider(rows, cols, &**f),
            None => EnvironmentGrid::from_config(&self.config, self.seed),
        };
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut world = World::with_parts(self.config, environment, rng)
            .expect("Failed to create world in test builder");
        let ids = self
            .plants
            .into_iter()
            .map(|(dna, pos)| world.place(dna, pos, None).expect("placement in test builder"))
            .collect();
        world.drain_events();
        (world, ids)
    }
}

#[allow(dead_code)]
pub fn dna(longevity: u32, decisions: &[Decision], reproductive: &[u32]) -> Dna {
    Dna::new(longevity, decisions.to_vec(), reproductive.to_vec()).expect("valid test dna")
}
