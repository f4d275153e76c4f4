//! Conway's Game of Life on a bounded grid.
//!
//! Cells outside the board never count as neighbours: the grid has hard
//! edges, it does not wrap.
//!
//! # Architecture
//!
//! - `compute`: Cells, grid state and the [`Board`] engine (rule, step, seeding)
//! - `schema`: Configuration, presets and seed specifications
//! - `schedule`: Periodic tick sources, wall-clock and virtual-time
//! - `driver`: [`Game`], which runs a board on a schedule and reports each
//!   generation to a [`StateObserver`]
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use life_engine::{
//!     compute::{Board, GridState},
//!     driver::Game,
//!     schema::Preset,
//! };
//!
//! // Step a board directly
//! let mut board = Board::new(25, 25).unwrap();
//! board.apply_preset(Preset::MiddleBand);
//! board.run(10);
//! println!("Alive after 10 steps: {}", board.stats().live_cells);
//!
//! // Or let a game drive it
//! let mut game = Game::new(25, 25).unwrap();
//! game.start(Duration::from_millis(500), |state: &GridState, generation: u64| {
//!     println!("generation {}: {} alive", generation, state.live_count());
//! })
//! .unwrap();
//! std::thread::sleep(Duration::from_secs(3));
//! game.stop();
//! ```

pub mod compute;
pub mod driver;
pub mod schedule;
pub mod schema;

// Re-export commonly used types
pub use compute::{Board, Cell, GridError, GridState, SimulationStats};
pub use driver::{Game, StateObserver, TextRenderer};
pub use schedule::{ManualScheduler, Scheduler, ThreadScheduler};
pub use schema::{Preset, Seed, SimulationConfig, Speed};
