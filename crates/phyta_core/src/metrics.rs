//! Run metrics and structured logging setup.
//!
//! [`Metrics`] accumulates counters from each [`TickReport`] and emits a
//! summary line every `report_interval` ticks.

use crate::world::TickReport;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

pub const BIRTHS: &str = "births";
pub const DEATHS: &str = "deaths";
pub const CULLS: &str = "culls";
pub const PLACEMENT_FAILURES: &str = "placement_failures";
pub const ERRORS: &str = "errors";

/// Metrics collector for a simulation run.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    peak_population: AtomicU64,
    counters: Mutex<HashMap<String, AtomicU64>>,
    report_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `report_interval` ticks.
    #[must_use]
    pub fn new(report_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            peak_population: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            report_interval: report_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Folds a finished tick into the totals.
    pub fn record_tick(&self, report: &TickReport, duration: Duration) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        let population = report.population as u64;
        self.population.store(population, Ordering::Relaxed);
        self.peak_population.fetch_max(population, Ordering::Relaxed);

        self.add(BIRTHS, report.births as u64);
        self.add(DEATHS, report.deaths as u64);
        self.add(PLACEMENT_FAILURES, report.crowded as u64);
        self.add(ERRORS, report.errors.len() as u64);
        if report.culled {
            self.increment_counter(CULLS);
        }

        if tick % self.report_interval == 0 {
            tracing::info!(
                tick = tick,
                population = population,
                births = self.counter(BIRTHS),
                deaths = self.counter(DEATHS),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        self.add(name, 1);
    }

    fn add(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a named counter, 0 if never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn peak_population(&self) -> u64 {
        self.peak_population.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
