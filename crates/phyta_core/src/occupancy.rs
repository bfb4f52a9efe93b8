//! Which organism, if any, sits on each cell.

use crate::error::{Result, SimError};
use phyta_data::{OrganismId, Position};

/// Rows × cols grid of optional organism ids, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: u32,
    cols: u32,
    cells: Vec<Option<OrganismId>>,
}

impl OccupancyGrid {
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    #[must_use]
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.cols as usize + pos.x as usize)
    }

    /// Inverse of [`index`](Self::index): `(idx % cols, idx / cols)`.
    #[must_use]
    pub fn position_of(&self, idx: usize) -> Option<Position> {
        if idx >= self.cells.len() {
            return None;
        }
        let cols = self.cols as usize;
        Some(Position::new((idx % cols) as u32, (idx / cols) as u32))
    }

    /// Neighbouring cell at `(dx, dy)`, if it is on the grid.
    #[must_use]
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Option<Position> {
        let x = u32::try_from(i64::from(pos.x) + dx).ok()?;
        let y = u32::try_from(i64::from(pos.y) + dy).ok()?;
        let target = Position::new(x, y);
        self.contains(target).then_some(target)
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<OrganismId> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Claims an empty cell for `id`.
    pub fn occupy(&mut self, pos: Position, id: OrganismId) -> Result<()> {
        let idx = self.index(pos).ok_or(SimError::OutOfBounds(pos))?;
        match self.cells[idx] {
            Some(occupant) => Err(SimError::Occupied {
                position: pos,
                occupant,
            }),
            None => {
                self.cells[idx] = Some(id);
                Ok(())
            }
        }
    }

    /// Empties `pos` if it holds `id`. Returns whether anything was cleared.
    pub fn vacate(&mut self, pos: Position, id: OrganismId) -> bool {
        match self.index(pos) {
            Some(idx) if self.cells[idx] == Some(id) => {
                self.cells[idx] = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Every occupied cell with its occupant, in row-major order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Position, OrganismId)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|id| (Position::new((idx % cols) as u32, (idx / cols) as u32), id))
        })
    }
}
