//! Compute module - Grid state and the Game of Life engine.

mod board;
mod cell;
mod grid;

pub use board::*;
pub use cell::*;
pub use grid::*;
