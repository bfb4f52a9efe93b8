//! Per-tick organism behaviour: metabolism, reproduction and death.

use crate::config::{MetabolismConfig, RichnessMode};
use crate::error::{Result, SimError};
use crate::mutation::DnaLogic;
use crate::placement::{find_nursery, Nursery};
use crate::world::World;
use phyta_data::{DeathCause, Decision, OrganismId};
use rand::Rng;

/// Richness floor for the inverted invest formula.
pub const MIN_RICHNESS: f64 = 0.1;

/// Energy gained on an INVEST turn.
#[must_use]
pub fn invest_gain(richness: f64, metabolism: &MetabolismConfig) -> i64 {
    let gain = match metabolism.richness_mode {
        RichnessMode::Inverted => metabolism.invest_yield / richness.max(MIN_RICHNESS),
        RichnessMode::Direct => richness * metabolism.direct_invest_rate,
    };
    gain.floor() as i64
}

/// Vitality regained on a HOMEOSTASIS turn.
#[must_use]
pub fn homeostasis_gain(richness: f64, metabolism: &MetabolismConfig) -> i64 {
    (richness * metabolism.homeostasis_rate).floor() as i64
}

/// What a single organism did during its step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Offspring placed this step, in birth order.
    pub children: Vec<OrganismId>,
    /// Paid-for offspring lost because no neighbour was free.
    pub crowded: usize,
    /// Brood slots skipped because energy ran short.
    pub unaffordable: usize,
    pub died: bool,
}

impl<R: Rng> World<R> {
    /// Advances one organism by one turn.
    pub fn step(&mut self, id: OrganismId) -> Result<StepOutcome> {
        let denominator = self.config.evolution.mutation_chance;
        let metabolism = &self.config.metabolism;
        let organism = self.registry.get_mut(id).ok_or(SimError::NotFound(id))?;

        organism.vitality -= 1;
        let richness = organism.environmental_richness;
        match *organism.dna.decisions().at(organism.turn) {
            Decision::Invest => organism.energy += invest_gain(richness, metabolism),
            Decision::Homeostasis => organism.vitality += homeostasis_gain(richness, metabolism),
        }

        let mut outcome = StepOutcome::default();
        let mut energy = organism.energy;
        let longevity = organism.longevity();
        if energy >= i64::from(longevity) {
            let progeny = *organism.dna.reproductive_decisions().at(organism.reproductive_turn);
            organism.reproductive_turn += 1;
            let origin = organism.position;
            let parent_dna = organism.dna.clone();

            for _ in 0..progeny {
                let child = parent_dna.mutated(denominator, &mut self.rng);
                let cost = i64::from(child.longevity());
                if cost > energy {
                    outcome.unaffordable += 1;
                    continue;
                }
                energy -= cost;
                match find_nursery(&self.occupancy, &self.registry, origin, longevity, &mut self.rng) {
                    Nursery::Empty(position) => {
                        outcome.children.push(self.place(child, position, Some(id))?);
                    }
                    Nursery::Takeover { position, occupant } => {
                        self.destroy(occupant, DeathCause::Displaced)?;
                        tracing::debug!(parent = %id, evicted = %occupant, %position, "takeover");
                        outcome.children.push(self.place(child, position, Some(id))?);
                    }
                    Nursery::Crowded => outcome.crowded += 1,
                }
            }
            if !outcome.children.is_empty() {
                tracing::debug!(parent = %id, born = outcome.children.len(), "offspring placed");
            }
        }

        let organism = self.registry.get_mut(id).ok_or(SimError::NotFound(id))?;
        organism.energy = energy;
        if organism.is_dead() {
            let turn = organism.turn;
            self.destroy(id, DeathCause::Exhausted)?;
            tracing::debug!(%id, turn, "died");
            outcome.died = true;
            return Ok(outcome);
        }
        organism.turn += 1;
        Ok(outcome)
    }
}
