//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `phyta.toml` file. Every section falls back to its `Default` impl when
//! omitted, so a partial file only overrides what it names.
//!
//! ## Example `phyta.toml`
//!
//! ```toml
//! [world]
//! rows = 100
//! cols = 100
//! seed = 42
//! population_ceiling = 1000000
//!
//! [environment]
//! mode = "noise"
//! noise_scale = 100.0
//!
//! [evolution]
//! mutation_chance = 20
//!
//! [metabolism]
//! richness_mode = "inverted"
//!
//! [template]
//! longevity = 1
//! decisions = ["invest"]
//! reproductive_decisions = [2]
//! ```

use crate::mutation::MAX_BROOD;
use phyta_data::{Color, Cycle, Decision, Dna};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Grid dimensions and run-level limits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub rows: u32,
    pub cols: u32,
    /// Seed for both the environment noise and the simulation RNG.
    pub seed: Option<u64>,
    /// Live population above which the whole population is culled.
    pub population_ceiling: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            seed: None,
            population_ceiling: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    #[default]
    Noise,
    Uniform,
}

/// How the environmental richness grid is generated before the run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub mode: EnvironmentMode,
    /// Richness of every cell in `uniform` mode.
    pub uniform_value: f64,
    /// Cells per noise feature; larger is smoother.
    pub noise_scale: f64,
    pub amplitude: f64,
    pub offset: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            mode: EnvironmentMode::Noise,
            uniform_value: 5.0,
            noise_scale: 100.0,
            amplitude: 10.0,
            offset: 4.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Each field mutates with probability of roughly `1 / mutation_chance`.
    pub mutation_chance: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_chance: 20,
        }
    }
}

/// Which way richness feeds the INVEST energy gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RichnessMode {
    /// Poorer cells yield more energy per invest step.
    #[default]
    Inverted,
    /// Richer cells yield more energy per invest step.
    Direct,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetabolismConfig {
    pub richness_mode: RichnessMode,
    /// Numerator of the inverted invest formula.
    pub invest_yield: f64,
    /// Energy per unit of richness in direct mode.
    pub direct_invest_rate: f64,
    /// Vitality per unit of richness on a homeostasis turn.
    pub homeostasis_rate: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            richness_mode: RichnessMode::Inverted,
            invest_yield: 10.0,
            direct_invest_rate: 0.4,
            homeostasis_rate: 0.2,
        }
    }
}

/// Run loop settings. The engine itself never reads these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    pub initial_population: usize,
    /// Seed one more template organism every N ticks; 0 disables.
    pub spawn_interval: u64,
    pub max_ticks: u64,
    /// Ticks between metric summaries.
    pub report_interval: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            initial_population: 1,
            spawn_interval: 0,
            max_ticks: 1_000,
            report_interval: 100,
        }
    }
}

#[must_use]
pub fn default_template() -> Dna {
    Dna::from_parts(
        NonZeroU32::MIN,
        Cycle::single(Decision::Invest),
        Cycle::single(2),
        Color::TEAL,
    )
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub environment: EnvironmentConfig,
    pub evolution: EvolutionConfig,
    pub metabolism: MetabolismConfig,
    pub driver: DriverConfig,
    /// DNA given to seeded organisms.
    pub template: Dna,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            environment: EnvironmentConfig::default(),
            evolution: EvolutionConfig::default(),
            metabolism: MetabolismConfig::default(),
            driver: DriverConfig::default(),
            template: default_template(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.rows > 0, "World rows must be positive");
        anyhow::ensure!(self.world.cols > 0, "World cols must be positive");
        anyhow::ensure!(self.world.rows <= 10_000, "World rows too large (max 10000)");
        anyhow::ensure!(self.world.cols <= 10_000, "World cols too large (max 10000)");
        anyhow::ensure!(
            self.world.population_ceiling > 0,
            "Population ceiling must be positive"
        );

        // Environment validation
        anyhow::ensure!(
            self.environment.uniform_value.is_finite() && self.environment.uniform_value >= 0.0,
            "Uniform richness must be a non-negative number"
        );
        anyhow::ensure!(
            self.environment.noise_scale > 0.0,
            "Noise scale must be positive"
        );
        anyhow::ensure!(
            self.environment.amplitude >= 0.0,
            "Noise amplitude must be non-negative"
        );

        // Evolution validation
        anyhow::ensure!(
            self.evolution.mutation_chance >= 1,
            "Mutation chance denominator must be at least 1"
        );

        // Metabolism validation
        anyhow::ensure!(
            self.metabolism.invest_yield >= 0.0,
            "Invest yield must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.direct_invest_rate >= 0.0,
            "Direct invest rate must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.homeostasis_rate >= 0.0,
            "Homeostasis rate must be non-negative"
        );

        // Template validation
        anyhow::ensure!(
            self.template.reproductive_decisions().iter().all(|&n| n <= MAX_BROOD),
            "Template brood sizes must not exceed {MAX_BROOD}"
        );

        // Driver validation
        anyhow::ensure!(
            self.driver.report_interval > 0,
            "Report interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every setting that influences simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.environment).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.template).as_bytes());
        hex::encode(hasher.finalize())
    }
}
