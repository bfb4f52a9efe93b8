//! Error types for the simulation engine.
//!
//! None of these are fatal to a run: the world reports them in the
//! [`TickReport`](crate::world::TickReport) and carries on.

use phyta_data::{OrganismId, Position};
use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// The id is not (or no longer) in the registry.
    #[error("Organism not found: {0}")]
    NotFound(OrganismId),

    /// A free-cell search ran out of attempts.
    #[error("No free cell found after {attempts} attempts")]
    GridExhausted { attempts: u32 },

    /// A position outside the grid was addressed.
    #[error("Position out of bounds: {0}")]
    OutOfBounds(Position),

    /// A placement targeted a cell that already holds an organism.
    #[error("Cell {position} already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: OrganismId,
    },

    /// Grid and registry disagree.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    #[must_use]
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Whether the driver should expect this during a normal run.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvariantViolation(_))
    }
}
