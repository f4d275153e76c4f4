//! Presentation side: consumers of generation snapshots.

use std::io::Write;

use crate::compute::GridState;

/// Receives every generation produced by a running game.
///
/// Called while the game holds its board lock, so implementations must not
/// call back into the [`Game`](super::Game).
pub trait StateObserver: Send + 'static {
    fn on_state(&mut self, state: &GridState, generation: u64);
}

impl<F> StateObserver for F
where
    F: FnMut(&GridState, u64) + Send + 'static,
{
    fn on_state(&mut self, state: &GridState, generation: u64) {
        self(state, generation)
    }
}

/// Writes each generation as text, one line per board row.
pub struct TextRenderer<W> {
    out: W,
    width: usize,
    live: char,
    dead: char,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            live: '#',
            dead: '.',
        }
    }

    /// Override the live/dead glyphs.
    pub fn with_glyphs(mut self, live: char, dead: char) -> Self {
        self.live = live;
        self.dead = dead;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render one generation.
    pub fn render(&mut self, state: &GridState, generation: u64) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Generation {} ({} alive)",
            generation,
            state.live_count()
        )?;
        for row in state.cells().chunks(self.width.max(1)) {
            let line: String = row
                .iter()
                .map(|c| if c.is_alive() { self.live } else { self.dead })
                .collect();
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write + Send + 'static> StateObserver for TextRenderer<W> {
    fn on_state(&mut self, state: &GridState, generation: u64) {
        if let Err(e) = self.render(state, generation) {
            log::warn!("Failed to render generation {}: {}", generation, e);
        }
    }
}
