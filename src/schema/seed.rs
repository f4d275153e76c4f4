//! Seed types for initializing a board.

use serde::{Deserialize, Serialize};

use crate::compute::{Cell, GridState};

/// Side length of the board the preset shapes were laid out on.
pub const PRESET_REFERENCE_SIDE: usize = 25;

/// Last index of the reference board; preset bounds scale against it.
const PRESET_REFERENCE_LAST: u64 = (PRESET_REFERENCE_SIDE * PRESET_REFERENCE_SIDE - 1) as u64;

/// How a board is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Seed {
    /// Every cell dead.
    Empty,
    /// Roughly one cell in eight alive at random positions.
    Random {
        /// Fixed RNG seed for reproducible boards. `None` keeps the board's RNG.
        #[serde(default)]
        rng_seed: Option<u64>,
    },
    /// One of the fixed preset shapes.
    Preset { preset: Preset },
    /// Explicit list of live `(x, y)` coordinates.
    Custom { alive: Vec<(usize, usize)> },
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Random { rng_seed: None }
    }
}

/// Fixed seed shapes.
///
/// On a 25x25 board they light exactly:
/// - `TopRow`: indices `0..25`
/// - `EvenSweep`: even indices in `0..=200`
/// - `MiddleBand`: indices `300..=600`
/// - `EvenCells`: every even index
///
/// On other board sizes the index bounds scale with the cell count, so every
/// preset stays in range and covers the same share of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    TopRow,
    EvenSweep,
    MiddleBand,
    EvenCells,
}

impl Preset {
    /// All presets in button order (preset 1 through 4).
    pub const ALL: [Preset; 4] = [
        Preset::TopRow,
        Preset::EvenSweep,
        Preset::MiddleBand,
        Preset::EvenCells,
    ];

    /// Indices lit by this preset on a `width` x `height` board.
    pub fn alive_indices(self, width: usize, height: usize) -> Vec<usize> {
        let len = width * height;
        if len == 0 {
            return Vec::new();
        }
        match self {
            Preset::TopRow => (0..width).collect(),
            Preset::EvenSweep => (0..=scale_index(200, len)).step_by(2).collect(),
            Preset::MiddleBand => (scale_index(300, len)..=scale_index(600, len)).collect(),
            Preset::EvenCells => (0..len).step_by(2).collect(),
        }
    }

    /// Full grid state for this preset.
    pub fn generate(self, width: usize, height: usize) -> GridState {
        let mut cells = vec![Cell::dead(); width * height];
        for i in self.alive_indices(width, height) {
            cells[i] = Cell::alive();
        }
        GridState::from_cells(cells)
    }
}

/// Map an index of the 25x25 reference board onto a board of `len` cells.
fn scale_index(reference: u64, len: usize) -> usize {
    let last = (len - 1) as u64;
    (reference * last / PRESET_REFERENCE_LAST) as usize
}
