//! Driver module - runs a board on a schedule and feeds observers.

mod game;
mod observer;

pub use game::Game;
pub use observer::{StateObserver, TextRenderer};
