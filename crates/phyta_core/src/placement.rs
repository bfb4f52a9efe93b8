//! Where new organisms go.
//!
//! Two strategies: a global random search used for seeding, and a local
//! Moore-neighbourhood search used when a plant reproduces.

use crate::occupancy::OccupancyGrid;
use crate::registry::Registry;
use phyta_data::{OrganismId, Position};
use rand::seq::SliceRandom;
use rand::Rng;

/// Extra draws after the first one in a global search.
pub const SEARCH_RETRIES: u32 = 7;

/// The eight neighbours of a cell, centre excluded.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Outcome of a global free-cell search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSearch {
    Found(Position),
    /// Budget spent. Carries the last cell tried, which may well be occupied.
    Exhausted(Position),
}

impl CellSearch {
    /// The cell, but only if it was verified empty.
    #[must_use]
    pub fn found(self) -> Option<Position> {
        match self {
            Self::Found(pos) => Some(pos),
            Self::Exhausted(_) => None,
        }
    }

    /// The returned cell regardless of outcome.
    #[must_use]
    pub fn position(self) -> Position {
        match self {
            Self::Found(pos) | Self::Exhausted(pos) => pos,
        }
    }
}

/// Draws uniform cells until one is empty, at most `1 + SEARCH_RETRIES` times.
pub fn find_free_cell<R: Rng + ?Sized>(occupancy: &OccupancyGrid, rng: &mut R) -> CellSearch {
    let cells = occupancy.cell_count();
    let mut last = Position::new(0, 0);
    if cells == 0 {
        return CellSearch::Exhausted(last);
    }
    for _ in 0..=SEARCH_RETRIES {
        let idx = rng.gen_range(0..cells);
        let Some(pos) = occupancy.position_of(idx) else {
            continue;
        };
        if !occupancy.is_occupied(pos) {
            return CellSearch::Found(pos);
        }
        last = pos;
    }
    tracing::warn!(
        attempts = SEARCH_RETRIES + 1,
        "no free cell found; the grid may be full"
    );
    CellSearch::Exhausted(last)
}

/// Outcome of a neighbourhood search for an offspring cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nursery {
    Empty(Position),
    /// The occupant is weak enough to be evicted.
    Takeover {
        position: Position,
        occupant: OrganismId,
    },
    /// No neighbour qualified.
    Crowded,
}

/// Whether an occupant with `occupant_longevity` yields its cell to offspring
/// of a parent with `longevity`: strictly less than a third of it.
#[must_use]
pub fn can_displace(occupant_longevity: u32, longevity: u32) -> bool {
    u64::from(occupant_longevity) * 3 < u64::from(longevity)
}

/// Visits the neighbours of `origin` in random order and returns the first
/// that is empty or held by a displaceable occupant.
pub fn find_nursery<R: Rng + ?Sized>(
    occupancy: &OccupancyGrid,
    registry: &Registry,
    origin: Position,
    longevity: u32,
    rng: &mut R,
) -> Nursery {
    let mut offsets = MOORE_OFFSETS;
    offsets.shuffle(rng);
    for (dx, dy) in offsets {
        let Some(candidate) = occupancy.offset(origin, dx, dy) else {
            continue;
        };
        match occupancy.get(candidate) {
            None => return Nursery::Empty(candidate),
            Some(occupant) => {
                let weak = registry
                    .get(occupant)
                    .is_some_and(|o| can_displace(o.longevity(), longevity));
                if weak {
                    return Nursery::Takeover {
                        position: candidate,
                        occupant,
                    };
                }
            }
        }
    }
    Nursery::Crowded
}
