use super::entity::{OrganismId, Position};
use super::genome::Color;
use serde::{Deserialize, Serialize};

/// Why an organism left the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Vitality reached zero.
    Exhausted,
    /// Evicted by a much longer-lived neighbour's offspring.
    Displaced,
    /// Removed by the population ceiling.
    Culled,
}

/// State change produced by the engine, dispatched to presentation afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum WorldEvent {
    Created {
        id: OrganismId,
        position: Position,
        color: Color,
        parent: Option<OrganismId>,
        tick: u64,
    },
    Destroyed {
        id: OrganismId,
        position: Position,
        cause: DeathCause,
        tick: u64,
    },
}

impl WorldEvent {
    #[must_use]
    pub fn id(&self) -> OrganismId {
        match self {
            Self::Created { id, .. } | Self::Destroyed { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Created { position, .. } | Self::Destroyed { position, .. } => *position,
        }
    }
}
