use anyhow::{Context, Result};
use phyta_core::config::AppConfig;
use phyta_core::metrics::Metrics;
use phyta_core::{dispatch, PresentationSink, SimError, TickReport, World};
use std::path::Path;
use std::time::Instant;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TickLimit,
    Extinct,
}

/// End-of-run figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub population: usize,
    pub peak_population: u64,
    pub births: u64,
    pub deaths: u64,
    pub culls: u64,
    pub placement_failures: u64,
    pub reason: StopReason,
    pub fingerprint: String,
}

/// Drives a [`World`] tick by tick and forwards its events to a sink.
pub struct App {
    pub world: World,
    pub config: AppConfig,
    pub metrics: Metrics,
    pub running: bool,
}

/// Reads `path` if it exists, otherwise falls back to defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    AppConfig::from_toml(&content).with_context(|| format!("invalid config in {}", path.display()))
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let world = World::new(config.clone()).context("failed to build world")?;
        let metrics = Metrics::new(config.driver.report_interval);
        tracing::info!(
            rows = config.world.rows,
            cols = config.world.cols,
            mean_richness = world.environment().mean(),
            fingerprint = %config.fingerprint(),
            "World created"
        );
        Ok(Self {
            world,
            config,
            metrics,
            running: true,
        })
    }

    /// Seeds `count` template organisms. Returns how many were placed.
    pub fn seed_population<S: PresentationSink + ?Sized>(&mut self, count: usize, sink: &mut S) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            match self.world.seed_template() {
                Ok(_) => placed += 1,
                Err(err @ SimError::GridExhausted { .. }) => {
                    tracing::warn!(error = %err, "Seeding stopped early");
                    break;
                }
                Err(err) => tracing::warn!(error = %err, "Seeding failed"),
            }
        }
        dispatch(&self.world.drain_events(), sink);
        placed
    }

    /// One tick plus its side effects: re-seeding, dispatch and metrics.
    pub fn step<S: PresentationSink + ?Sized>(&mut self, sink: &mut S) -> TickReport {
        let started = Instant::now();
        let report = self.world.tick();
        dispatch(&report.events, sink);
        self.metrics.record_tick(&report, started.elapsed());

        let interval = self.config.driver.spawn_interval;
        if interval > 0 && self.world.tick_count() % interval == 0 {
            self.seed_population(1, sink);
        }
        report
    }

    /// Runs until `max_ticks` or extinction, whichever comes first.
    pub fn run<S: PresentationSink + ?Sized>(&mut self, max_ticks: u64, sink: &mut S) -> RunSummary {
        let seeded = self.seed_population(self.config.driver.initial_population, sink);
        tracing::debug!(seeded, "Initial population placed");

        let mut reason = StopReason::TickLimit;
        while self.running && self.world.tick_count() < max_ticks {
            let report = self.step(sink);
            if self.world.population() == 0 {
                tracing::info!(tick = report.tick, "Population extinct");
                reason = StopReason::Extinct;
                self.running = false;
            }
        }
        tracing::info!(
            ticks = self.world.tick_count(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        self.summary(reason)
    }

    #[must_use]
    pub fn summary(&self, reason: StopReason) -> RunSummary {
        use phyta_core::metrics::{BIRTHS, CULLS, DEATHS, PLACEMENT_FAILURES};
        RunSummary {
            ticks: self.world.tick_count(),
            population: self.world.population(),
            peak_population: self.metrics.peak_population(),
            births: self.metrics.counter(BIRTHS),
            deaths: self.metrics.counter(DEATHS),
            culls: self.metrics.counter(CULLS),
            placement_failures: self.metrics.counter(PLACEMENT_FAILURES),
            reason,
            fingerprint: self.config.fingerprint(),
        }
    }
}
