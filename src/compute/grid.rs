//! Grid state - one full generation of the board.
//!
//! Cells are stored as a flat row-major array: `index = y * width + x`.
//! Translating coordinates to indices is the board's job; a `GridState`
//! only knows its length.

use serde::{Deserialize, Serialize};

use super::Cell;

/// Errors raised by grid and board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Board dimensions {width}x{height} must be non-zero and fit in usize")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Cell index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Coordinate ({x}, {y}) outside {width}x{height} board")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Grid state has {actual} cells, board needs {expected}")]
    StateSizeMismatch { expected: usize, actual: usize },
}

/// Immutable-per-generation snapshot of every cell on the board.
///
/// Equality is index-wise on the alive flag. States of different length are
/// never equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridState {
    cells: Vec<Cell>,
}

impl GridState {
    /// All-dead state of `len` cells.
    pub fn dead(len: usize) -> Self {
        Self {
            cells: vec![Cell::dead(); len],
        }
    }

    /// Wrap cells already in row-major order.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a state from alive flags in row-major order.
    pub fn from_alive(flags: &[bool]) -> Self {
        Self {
            cells: flags.iter().copied().map(Cell::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a flat index.
    pub fn get(&self, index: usize) -> Result<Cell, GridError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GridError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    /// Replace the cell at a flat index.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), GridError> {
        let len = self.cells.len();
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })?;
        *slot = cell;
        Ok(())
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Unchecked read for callers that already validated the index.
    #[inline]
    pub(crate) fn is_alive_at(&self, index: usize) -> bool {
        self.cells[index].is_alive()
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl From<Vec<Cell>> for GridState {
    fn from(cells: Vec<Cell>) -> Self {
        Self::from_cells(cells)
    }
}
