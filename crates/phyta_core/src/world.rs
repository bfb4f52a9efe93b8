//! The simulation world: environment, occupancy, registry and RNG in one
//! explicitly constructed value.
//!
//! State changes never call out to presentation. They are recorded as
//! [`WorldEvent`]s and handed back in the [`TickReport`] (or via
//! [`World::drain_events`]) for the driver to dispatch.

use crate::config::AppConfig;
use crate::environment::EnvironmentGrid;
use crate::error::{Result, SimError};
use crate::occupancy::OccupancyGrid;
use crate::placement::{find_free_cell, CellSearch, SEARCH_RETRIES};
use crate::registry::Registry;
use phyta_data::{DeathCause, Dna, Organism, OrganismId, Position, WorldEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Index of the tick this report covers, starting at 0.
    pub tick: u64,
    /// Organisms stepped (the pre-tick snapshot minus those removed mid-tick).
    pub stepped: usize,
    pub births: usize,
    pub deaths: usize,
    /// Reproduction attempts that found no usable neighbour.
    pub crowded: usize,
    /// True when the population ceiling triggered a cull instead of a step.
    pub culled: bool,
    /// Live organisms after the tick.
    pub population: usize,
    /// Events recorded since the previous drain, in order.
    pub events: Vec<WorldEvent>,
    /// Non-fatal errors met along the way.
    pub errors: Vec<SimError>,
}

pub struct World<R: Rng = ChaCha8Rng> {
    pub(crate) config: AppConfig,
    pub(crate) environment: EnvironmentGrid,
    pub(crate) occupancy: OccupancyGrid,
    pub(crate) registry: Registry,
    pub(crate) rng: R,
    pub(crate) tick: u64,
    pub(crate) events: Vec<WorldEvent>,
}

impl World<ChaCha8Rng> {
    /// Validates `config`, generates the environment and seeds the RNG.
    ///
    /// Without a configured seed one is drawn from entropy.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random::<u64>);
        let environment = EnvironmentGrid::from_config(&config, seed);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_parts(config, environment, rng)
    }
}

impl<R: Rng> World<R> {
    /// Builds a world from injected parts. The environment must match the
    /// configured dimensions.
    pub fn with_parts(config: AppConfig, environment: EnvironmentGrid, rng: R) -> anyhow::Result<Self> {
        config.validate()?;
        anyhow::ensure!(
            environment.rows() == config.world.rows && environment.cols() == config.world.cols,
            "environment is {}x{} but the world is {}x{}",
            environment.rows(),
            environment.cols(),
            config.world.rows,
            config.world.cols
        );
        let occupancy = OccupancyGrid::new(config.world.rows, config.world.cols);
        Ok(Self {
            config,
            environment,
            occupancy,
            registry: Registry::new(),
            rng,
            tick: 0,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentGrid {
        &self.environment
    }

    #[must_use]
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of ticks completed.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.registry.len()
    }

    /// Snapshot of all live organisms, ordered by id.
    #[must_use]
    pub fn organisms(&self) -> Vec<Organism> {
        self.registry.all()
    }

    #[must_use]
    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn occupant(&self, pos: Position) -> Option<&Organism> {
        self.occupancy.get(pos).and_then(|id| self.registry.get(id))
    }

    /// Takes the events recorded since the last drain or tick.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Places `dna` on a random free cell.
    ///
    /// An exhausted search places nothing; the caller may try again later.
    pub fn seed(&mut self, dna: Dna) -> Result<OrganismId> {
        match find_free_cell(&self.occupancy, &mut self.rng) {
            CellSearch::Found(pos) => self.place(dna, pos, None),
            CellSearch::Exhausted(_) => Err(SimError::GridExhausted {
                attempts: SEARCH_RETRIES + 1,
            }),
        }
    }

    /// Seeds one copy of the configured template.
    pub fn seed_template(&mut self) -> Result<OrganismId> {
        let dna = self.config.template.clone();
        self.seed(dna)
    }

    /// Finalizes a new organism on an empty cell.
    pub fn place(&mut self, dna: Dna, position: Position, parent: Option<OrganismId>) -> Result<OrganismId> {
        let richness = self
            .environment
            .get(position)
            .ok_or(SimError::OutOfBounds(position))?;
        if let Some(occupant) = self.occupancy.get(position) {
            return Err(SimError::Occupied { position, occupant });
        }
        let color = dna.color();
        let id = self.registry.create(dna, position, richness);
        self.occupancy.occupy(position, id)?;
        tracing::trace!(%id, %position, richness, "organism placed");
        self.events.push(WorldEvent::Created {
            id,
            position,
            color,
            parent,
            tick: self.tick,
        });
        Ok(id)
    }

    /// Removes an organism from the registry and clears its cell.
    pub fn destroy(&mut self, id: OrganismId, cause: DeathCause) -> Result<Organism> {
        let organism = self.registry.destroy(id)?;
        if !self.occupancy.vacate(organism.position, id) {
            return Err(SimError::invariant(format!(
                "{id} was not on its cell {}",
                organism.position
            )));
        }
        tracing::trace!(%id, position = %organism.position, ?cause, "organism removed");
        self.events.push(WorldEvent::Destroyed {
            id,
            position: organism.position,
            cause,
            tick: self.tick,
        });
        Ok(organism)
    }

    /// Destroys every live organism. Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let culled = self.registry.drain_all();
        self.occupancy.clear();
        for organism in &culled {
            self.events.push(WorldEvent::Destroyed {
                id: organism.id,
                position: organism.position,
                cause: DeathCause::Culled,
                tick: self.tick,
            });
        }
        culled.len()
    }

    /// Runs one tick over the organisms alive when it starts.
    ///
    /// Offspring born during the tick wait for the next one; organisms removed
    /// mid-tick are skipped. Above the population ceiling the tick culls
    /// everyone instead.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        if self.registry.len() > self.config.world.population_ceiling {
            let culled = self.cull();
            tracing::info!(
                tick = self.tick,
                culled,
                ceiling = self.config.world.population_ceiling,
                "Population ceiling exceeded, culling"
            );
            report.culled = true;
        } else {
            for id in self.registry.ids() {
                if !self.registry.contains(id) {
                    continue;
                }
                report.stepped += 1;
                match self.step(id) {
                    Ok(outcome) => report.crowded += outcome.crowded,
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "Life-cycle step failed");
                        report.errors.push(err);
                    }
                }
            }
        }

        self.tick += 1;
        report.events = self.drain_events();
        for event in &report.events {
            match event {
                WorldEvent::Created { .. } => report.births += 1,
                WorldEvent::Destroyed { .. } => report.deaths += 1,
            }
        }
        report.population = self.registry.len();
        report
    }

    /// Checks the one-to-one mapping between live organisms and occupied cells.
    pub fn check_invariants(&self) -> Result<()> {
        for organism in self.registry.iter() {
            match self.occupancy.get(organism.position) {
                Some(id) if id == organism.id => {}
                other => {
                    return Err(SimError::invariant(format!(
                        "{} at {} but the cell holds {:?}",
                        organism.id, organism.position, other
                    )))
                }
            }
        }
        let occupied = self.occupancy.occupied_count();
        if occupied != self.registry.len() {
            return Err(SimError::invariant(format!(
                "{occupied} occupied cells for {} organisms",
                self.registry.len()
            )));
        }
        Ok(())
    }
}
