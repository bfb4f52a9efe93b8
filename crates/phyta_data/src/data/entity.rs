use super::genome::Dna;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identity of an organism. Assigned in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    /// Fixed for the organism's lifetime.
    pub position: Position,
    pub vitality: i64,
    pub energy: i64,
    pub turn: u64,
    pub reproductive_turn: u64,
    pub dna: Dna,
    /// Sampled from the environment once, at creation.
    pub environmental_richness: f64,
}

impl Organism {
    /// A freshly placed organism: full vitality, no energy, counters at zero.
    #[must_use]
    pub fn newborn(id: OrganismId, position: Position, dna: Dna, environmental_richness: f64) -> Self {
        Self {
            id,
            position,
            vitality: i64::from(dna.longevity()),
            energy: 0,
            turn: 0,
            reproductive_turn: 0,
            dna,
            environmental_richness,
        }
    }

    #[must_use]
    pub fn longevity(&self) -> u32 {
        self.dna.longevity()
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.vitality <= 0
    }
}
