//! # Phyta Core
//!
//! The simulation engine for Phyta, a grid of plants that metabolize,
//! reproduce with mutation and die.
//!
//! This crate contains:
//! - The DNA mutation operator
//! - The per-tick life-cycle state machine
//! - Global and neighbourhood placement policies
//! - The organism registry and occupancy grid
//! - Environment generation
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Everything hangs off an explicitly constructed [`World`]. Randomness is
//! injected as any [`rand::Rng`], richness through [`EnvironmentProvider`],
//! and presentation is fed afterwards from the events in each [`TickReport`].
//!
//! ## Example
//!
//! ```
//! use phyta_core::config::AppConfig;
//! use phyta_core::World;
//!
//! let mut config = AppConfig::default();
//! config.world.rows = 20;
//! config.world.cols = 20;
//! config.world.seed = Some(42);
//!
//! let mut world = World::new(config).unwrap();
//! world.seed_template().unwrap();
//! let report = world.tick();
//! assert_eq!(report.tick, 0);
//! assert!(world.check_invariants().is_ok());
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Environmental richness providers and the pregenerated grid
pub mod environment;
/// Engine error type
pub mod error;
/// Organism step: metabolism, reproduction, death
pub mod lifecycle;
/// Performance metrics and structured logging
pub mod metrics;
/// DNA mutation operator
pub mod mutation;
/// Cell ownership grid
pub mod occupancy;
/// Free-cell and neighbourhood search
pub mod placement;
/// Presentation sink interface
pub mod presentation;
/// Live organism store
pub mod registry;
/// The world and its tick
pub mod world;

pub use environment::{EnvironmentGrid, EnvironmentProvider};
pub use error::{Result, SimError};
pub use lifecycle::StepOutcome;
pub use mutation::DnaLogic;
pub use presentation::{dispatch, NullSink, PresentationSink};
pub use world::{TickReport, World};
