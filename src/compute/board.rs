//! Board - the simulation engine.
//!
//! Owns the board dimensions, the current generation and the generation
//! counter. Implements neighbour counting, Conway's rule, the full-grid step
//! and every seed operation.

use rand::prelude::*;
use rayon::prelude::*;

use crate::schema::{Preset, Seed};

use super::{Cell, GridError, GridState};

/// Neighbour offsets, excluding the cell itself.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Conway's rule: survival on 2 or 3 neighbours, birth on exactly 3.
#[inline]
pub fn conway_rule(alive: bool, neighbors: usize) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Game of Life board with hard edges.
pub struct Board {
    width: usize,
    height: usize,
    len: usize,
    state: GridState,
    generation: u64,
    rng: StdRng,
}

impl Board {
    /// Create an all-dead board with an entropy-seeded RNG.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Create an all-dead board whose random seeding is reproducible.
    pub fn with_rng_seed(width: usize, height: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: usize, height: usize, rng: StdRng) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(GridError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            len,
            state: GridState::dead(len),
            generation: 0,
            rng,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; dimensions are non-zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current generation.
    #[inline]
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Steps completed since the last seed operation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Convert `(x, y)` to a row-major index.
    pub fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::CoordinateOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Cell at `(x, y)`.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        let idx = self.index(x, y)?;
        self.state.get(idx)
    }

    /// Number of live cells among the 8 surrounding positions.
    ///
    /// Positions off the board are skipped, never wrapped or clamped.
    pub fn neighbor_count(&self, x: usize, y: usize) -> Result<usize, GridError> {
        self.index(x, y)?;
        Ok(self.alive_neighbors(x, y))
    }

    /// Whether `(x, y)` is alive in the next generation.
    pub fn next_cell_state(&self, x: usize, y: usize) -> Result<bool, GridError> {
        let idx = self.index(x, y)?;
        Ok(conway_rule(
            self.state.is_alive_at(idx),
            self.alive_neighbors(x, y),
        ))
    }

    fn alive_neighbors(&self, x: usize, y: usize) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.width)?;
                let ny = y.checked_add_signed(dy).filter(|&ny| ny < self.height)?;
                Some(ny * self.width + nx)
            })
            .filter(|&i| self.state.is_alive_at(i))
            .count()
    }

    /// Advance one generation.
    ///
    /// Every cell reads only the pre-step state, so rows are evaluated in
    /// parallel and the result does not depend on evaluation order.
    pub fn step(&mut self) -> &GridState {
        let width = self.width;
        let mut next = GridState::dead(self.len());

        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let alive = self.state.is_alive_at(y * width + x);
                    *cell = Cell::from(conway_rule(alive, self.alive_neighbors(x, y)));
                }
            });

        self.state = next;
        self.generation += 1;
        log::debug!(
            "Generation {}: {} live cells",
            self.generation,
            self.state.live_count()
        );
        &self.state
    }

    /// Run `steps` generations.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Install an explicit state. Counts as a seed operation.
    pub fn set_state(&mut self, state: GridState) -> Result<(), GridError> {
        if state.len() != self.len() {
            return Err(GridError::StateSizeMismatch {
                expected: self.len(),
                actual: state.len(),
            });
        }
        self.replace(state);
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.replace(GridState::dead(self.len()));
    }

    /// Light about one cell in eight at random.
    ///
    /// Draws `(len - 1) / 8` indices from `[0, len - 1)`. Duplicate draws are
    /// allowed, so fewer cells may end up alive.
    pub fn randomize(&mut self) {
        let len = self.len();
        let draws = (len - 1) / 8;
        let mut state = GridState::dead(len);
        let cells = state.cells_mut();
        for _ in 0..draws {
            let idx = self.rng.gen_range(0..len - 1);
            cells[idx] = Cell::alive();
        }
        self.replace(state);
    }

    /// Reseed the RNG used by [`Board::randomize`].
    pub fn reseed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace the board with a preset shape.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.replace(preset.generate(self.width, self.height));
    }

    /// Apply a seed specification. Rejected before any mutation if it names
    /// a coordinate off the board.
    pub fn apply_seed(&mut self, seed: &Seed) -> Result<(), GridError> {
        match seed {
            Seed::Empty => self.clear(),
            Seed::Random { rng_seed } => {
                if let Some(s) = rng_seed {
                    self.reseed_rng(*s);
                }
                self.randomize();
            }
            Seed::Preset { preset } => self.apply_preset(*preset),
            Seed::Custom { alive } => {
                let mut state = GridState::dead(self.len());
                for &(x, y) in alive {
                    let idx = self.index(x, y)?;
                    state.set(idx, Cell::alive())?;
                }
                self.replace(state);
            }
        }
        Ok(())
    }

    /// Generation and live-cell summary.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_board(self)
    }

    fn replace(&mut self, state: GridState) {
        self.state = state;
        self.generation = 0;
    }
}

/// Summary of a board at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationStats {
    pub generation: u64,
    pub live_cells: usize,
    pub total_cells: usize,
}

impl SimulationStats {
    pub fn from_board(board: &Board) -> Self {
        Self {
            generation: board.generation(),
            live_cells: board.state().live_count(),
            total_cells: board.len(),
        }
    }

    /// Fraction of cells alive.
    pub fn density(&self) -> f32 {
        self.live_cells as f32 / self.total_cells as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::seq::SliceRandom;

    const D: bool = false;
    const A: bool = true;

    fn board_3x3(flags: [bool; 9]) -> Board {
        let mut board = Board::with_rng_seed(3, 3, 7).unwrap();
        board.set_state(GridState::from_alive(&flags)).unwrap();
        board
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Board::new(0, 5).err(),
            Some(GridError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Board::new(5, 0).is_err());
    }

    #[test]
    fn test_dimensions_overflow() {
        assert_eq!(
            Board::new(usize::MAX, 2).err(),
            Some(GridError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
        let side = 1usize << (usize::BITS / 2 + 1);
        assert!(Board::with_rng_seed(side, side, 0).is_err());
    }

    #[test]
    fn test_new_board_is_dead() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(board.state(), &GridState::dead(12));
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_survival() {
        let board = board_3x3([D, D, D, A, A, A, D, D, D]);
        assert_eq!(board.neighbor_count(1, 1), Ok(2));
        assert_eq!(board.next_cell_state(1, 1), Ok(true));

        let board = board_3x3([D, A, D, D, A, A, D, A, D]);
        assert_eq!(board.neighbor_count(1, 1), Ok(3));
        assert_eq!(board.next_cell_state(1, 1), Ok(true));
    }

    #[test]
    fn test_birth() {
        let board = board_3x3([A, D, D, A, A, D, D, D, D]);
        assert_eq!(board.neighbor_count(1, 0), Ok(3));
        assert_eq!(board.next_cell_state(1, 0), Ok(true));
    }

    #[test]
    fn test_death_by_loneliness() {
        let board = board_3x3([D, D, D, D, A, D, D, D, D]);
        assert_eq!(board.neighbor_count(1, 1), Ok(0));
        assert_eq!(board.next_cell_state(1, 1), Ok(false));
    }

    #[test]
    fn test_death_by_overcrowding() {
        let board = board_3x3([A; 9]);
        assert_eq!(board.neighbor_count(1, 1), Ok(8));
        assert_eq!(board.next_cell_state(1, 1), Ok(false));
    }

    #[test]
    fn test_two_cells_decay_in_one_step() {
        let mut board = board_3x3([D, A, D, D, D, D, D, A, D]);
        let next = board.step().clone();
        assert_eq!(next, GridState::dead(9));
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn test_hard_edges() {
        // Live cells along the far edges must not wrap onto the opposite side
        let mut flags = [D; 9];
        flags[2] = A; // (2, 0)
        flags[5] = A; // (2, 1)
        flags[8] = A; // (2, 2)
        let board = board_3x3(flags);

        assert_eq!(board.neighbor_count(0, 1), Ok(0));
        assert_eq!(board.neighbor_count(0, 0), Ok(0));
        assert_eq!(board.neighbor_count(1, 1), Ok(3));
        // Corner sees only 3 in-bounds neighbours
        assert_eq!(board.neighbor_count(2, 0), Ok(1));
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut board = Board::with_rng_seed(5, 5, 1).unwrap();
        board
            .apply_seed(&Seed::Custom {
                alive: vec![(1, 2), (2, 2), (3, 2)],
            })
            .unwrap();
        let horizontal = board.state().clone();

        board.step();
        let vertical = [(2, 1), (2, 2), (2, 3)];
        for (x, y) in vertical {
            assert!(board.cell_at(x, y).unwrap().is_alive());
        }
        assert_eq!(board.state().live_count(), 3);

        board.step();
        assert_eq!(board.state(), &horizontal);
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn test_coordinate_out_of_range() {
        let board = Board::new(3, 2).unwrap();
        let err = GridError::CoordinateOutOfRange {
            x: 3,
            y: 0,
            width: 3,
            height: 2,
        };
        assert_eq!(board.neighbor_count(3, 0), Err(err.clone()));
        assert_eq!(board.next_cell_state(3, 0), Err(err));
        assert!(board.cell_at(0, 2).is_err());
    }

    #[test]
    fn test_set_state_size_mismatch() {
        let mut board = Board::new(3, 3).unwrap();
        board.randomize();
        board.step();
        let before = board.state().clone();

        let result = board.set_state(GridState::dead(8));
        assert_eq!(
            result,
            Err(GridError::StateSizeMismatch {
                expected: 9,
                actual: 8
            })
        );
        assert_eq!(board.state(), &before);
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut board = Board::with_rng_seed(10, 10, 3).unwrap();
        board.apply_preset(Preset::EvenCells);
        board.step();

        board.clear();
        let first = board.state().clone();
        assert_eq!(board.generation(), 0);

        board.clear();
        assert_eq!(board.state(), &first);
        assert_eq!(board.state(), &GridState::dead(100));
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_randomize_density_bound() {
        for (w, h) in [(1, 1), (3, 3), (25, 25), (40, 17)] {
            let mut board = Board::with_rng_seed(w, h, 99).unwrap();
            board.step();
            board.randomize();

            let bound = (w * h - 1) / 8 + 1;
            assert_eq!(board.generation(), 0);
            assert!(board.state().live_count() <= bound);
            assert_eq!(board.state().len(), w * h);
        }
    }

    #[test]
    fn test_randomize_replaces_previous_seed() {
        let mut board = Board::with_rng_seed(25, 25, 5).unwrap();
        board.apply_preset(Preset::EvenCells);
        board.randomize();
        assert!(board.state().live_count() <= 624 / 8 + 1);
    }

    #[test]
    fn test_randomize_reproducible() {
        let mut a = Board::with_rng_seed(25, 25, 1234).unwrap();
        let mut b = Board::with_rng_seed(25, 25, 1234).unwrap();
        a.randomize();
        b.randomize();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_presets_reset_generation() {
        let mut board = Board::new(25, 25).unwrap();
        for preset in Preset::ALL {
            board.run(3);
            board.apply_preset(preset);
            assert_eq!(board.generation(), 0);
            assert_eq!(board.state(), &preset.generate(25, 25));
        }
    }

    #[test]
    fn test_custom_seed_rejected_atomically() {
        let mut board = Board::new(4, 4).unwrap();
        board.apply_preset(Preset::TopRow);
        let before = board.state().clone();

        let result = board.apply_seed(&Seed::Custom {
            alive: vec![(0, 0), (4, 1)],
        });
        assert!(matches!(
            result,
            Err(GridError::CoordinateOutOfRange { x: 4, y: 1, .. })
        ));
        assert_eq!(board.state(), &before);
    }

    #[test]
    fn test_stats() {
        let mut board = Board::new(25, 25).unwrap();
        board.apply_preset(Preset::TopRow);
        let stats = board.stats();
        assert_eq!(stats.live_cells, 25);
        assert_eq!(stats.total_cells, 625);
        assert_eq!(stats.generation, 0);
        assert!((stats.density() - 0.04).abs() < 1e-6);
    }

    fn arb_board() -> impl Strategy<Value = (usize, usize, Vec<bool>)> {
        (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), prop::collection::vec(any::<bool>(), w * h))
        })
    }

    /// Reference count over signed coordinates.
    fn brute_force_neighbors(flags: &[bool], w: usize, h: usize, x: usize, y: usize) -> usize {
        let mut count = 0;
        for ny in y as isize - 1..=y as isize + 1 {
            for nx in x as isize - 1..=x as isize + 1 {
                if (nx, ny) == (x as isize, y as isize) {
                    continue;
                }
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                if flags[ny as usize * w + nx as usize] {
                    count += 1;
                }
            }
        }
        count
    }

    proptest! {
        #[test]
        fn neighbor_count_matches_reference((w, h, flags) in arb_board()) {
            let mut board = Board::with_rng_seed(w, h, 0).unwrap();
            board.set_state(GridState::from_alive(&flags)).unwrap();

            for y in 0..h {
                for x in 0..w {
                    let n = board.neighbor_count(x, y).unwrap();
                    prop_assert!(n <= 8);
                    prop_assert_eq!(n, brute_force_neighbors(&flags, w, h, x, y));
                }
            }
        }

        #[test]
        fn neighbor_count_ignores_self((w, h, flags) in arb_board()) {
            let mut board = Board::with_rng_seed(w, h, 0).unwrap();
            board.set_state(GridState::from_alive(&flags)).unwrap();
            let before: Vec<usize> = (0..w * h)
                .map(|i| board.neighbor_count(i % w, i / w).unwrap())
                .collect();

            // Toggling a cell never changes its own count
            for i in 0..w * h {
                let mut toggled = flags.clone();
                toggled[i] = !toggled[i];
                board.set_state(GridState::from_alive(&toggled)).unwrap();
                prop_assert_eq!(board.neighbor_count(i % w, i / w).unwrap(), before[i]);
            }
        }

        #[test]
        fn step_is_order_independent(
            (w, h, flags) in arb_board(),
            shuffle_seed in any::<u64>(),
        ) {
            let mut board = Board::with_rng_seed(w, h, 0).unwrap();
            board.set_state(GridState::from_alive(&flags)).unwrap();

            let mut order: Vec<usize> = (0..w * h).collect();
            order.shuffle(&mut StdRng::seed_from_u64(shuffle_seed));

            let mut expected = vec![Cell::dead(); w * h];
            for i in order {
                expected[i] = Cell::from(board.next_cell_state(i % w, i / w).unwrap());
            }

            let next = board.step().clone();
            prop_assert_eq!(next, GridState::from_cells(expected));
            prop_assert_eq!(board.generation(), 1);
        }
    }
}
