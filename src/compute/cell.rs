//! Single board cell.

use serde::{Deserialize, Serialize};

/// One alive/dead unit of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    /// A dead cell.
    #[inline]
    pub const fn dead() -> Self {
        Self { alive: false }
    }

    /// A live cell.
    #[inline]
    pub const fn alive() -> Self {
        Self { alive: true }
    }

    /// Whether the cell is alive.
    #[inline]
    pub const fn is_alive(self) -> bool {
        self.alive
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        Self { alive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories() {
        assert!(!Cell::dead().is_alive());
        assert!(Cell::alive().is_alive());
        assert_eq!(Cell::default(), Cell::dead());
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Cell::from(true), Cell::alive());
        assert_eq!(Cell::from(false), Cell::dead());
    }
}
