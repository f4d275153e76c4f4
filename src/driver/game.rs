//! Game - a board plus the schedule that drives it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::compute::{Board, GridError, GridState, SimulationStats};
use crate::schema::{ConfigError, Preset, Seed, SimulationConfig};
use crate::schedule::{CancelToken, ScheduleError, ScheduleHandle, Scheduler, ThreadScheduler};

use super::StateObserver;

/// An owned simulation with at most one active tick schedule.
///
/// Every operation and every tick runs under the board lock. Cancelling a
/// schedule also happens under that lock, and ticks re-check their token
/// after acquiring it, so once [`Game::stop`] or [`Game::clear`] returns no
/// further observer call can happen.
pub struct Game<S: Scheduler = ThreadScheduler> {
    board: Arc<Mutex<Board>>,
    scheduler: S,
    active: Option<ScheduleHandle>,
}

impl Game<ThreadScheduler> {
    /// All-dead game on the wall-clock scheduler.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self::with_scheduler(Board::new(width, height)?, ThreadScheduler))
    }
}

impl<S: Scheduler> Game<S> {
    /// Wrap an existing board, ticking on `scheduler`.
    pub fn with_scheduler(board: Board, scheduler: S) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            scheduler,
            active: None,
        }
    }

    /// Build a game from configuration and apply its seed.
    pub fn from_config(config: &SimulationConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = Board::new(config.width, config.height)?;
        board.apply_seed(&config.seed)?;
        Ok(Self::with_scheduler(board, scheduler))
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        acquire(&self.board)
    }

    /// Board width in cells.
    pub fn width(&self) -> usize {
        self.lock().width()
    }

    /// Board height in cells.
    pub fn height(&self) -> usize {
        self.lock().height()
    }

    /// Snapshot of the current generation.
    pub fn state(&self) -> GridState {
        self.lock().state().clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub fn stats(&self) -> SimulationStats {
        self.lock().stats()
    }

    /// Whether a schedule is active.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    /// Randomize, report generation 0 to `observer`, then step and report
    /// once per `interval`. Replaces any active schedule.
    pub fn start<O: StateObserver>(
        &mut self,
        interval: Duration,
        observer: O,
    ) -> Result<(), ScheduleError> {
        self.launch(interval, observer, true)
    }

    /// Like [`Game::start`] but keeps the current board: reports it at its
    /// current generation, then steps and reports once per `interval`.
    pub fn resume<O: StateObserver>(
        &mut self,
        interval: Duration,
        observer: O,
    ) -> Result<(), ScheduleError> {
        self.launch(interval, observer, false)
    }

    fn launch<O: StateObserver>(
        &mut self,
        interval: Duration,
        observer: O,
        reseed: bool,
    ) -> Result<(), ScheduleError> {
        if interval.is_zero() {
            return Err(ScheduleError::InvalidInterval);
        }

        let observer = Arc::new(Mutex::new(observer));
        let token = CancelToken::new();
        let task = {
            let board = Arc::clone(&self.board);
            let observer = Arc::clone(&observer);
            let tick_token = token.clone();
            Box::new(move || {
                let mut board = acquire(&board);
                if tick_token.is_cancelled() {
                    return;
                }
                board.step();
                acquire(&observer).on_state(board.state(), board.generation());
            })
        };

        // Nothing is touched until the new schedule exists. Holding the board
        // lock keeps its first tick behind the initial report.
        let mut board = acquire(&self.board);
        let handle = self.scheduler.schedule(interval, token, task)?;
        if let Some(mut previous) = self.active.take() {
            previous.cancel();
        }
        if reseed {
            board.randomize();
        }
        acquire(&observer).on_state(board.state(), board.generation());
        log::info!(
            "Started simulation at generation {}, interval {:?}",
            board.generation(),
            interval
        );
        drop(board);

        self.active = Some(handle);
        Ok(())
    }

    /// Cancel the active schedule. The board is left as is.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.active.take() {
            let board = acquire(&self.board);
            handle.cancel();
            log::info!("Stopped simulation at generation {}", board.generation());
        }
    }

    /// Kill every cell and stop the schedule.
    pub fn clear(&mut self) {
        self.stop();
        self.lock().clear();
        log::info!("Cleared board");
    }

    /// Random seed. Does not stop a running schedule.
    pub fn randomize(&self) {
        let mut board = self.lock();
        board.randomize();
        log::info!("Randomized board: {} alive", board.state().live_count());
    }

    /// Apply a preset. Does not stop a running schedule.
    pub fn apply_preset(&self, preset: Preset) {
        self.lock().apply_preset(preset);
        log::info!("Applied preset {:?}", preset);
    }

    pub fn preset1(&self) {
        self.apply_preset(Preset::TopRow);
    }

    pub fn preset2(&self) {
        self.apply_preset(Preset::EvenSweep);
    }

    pub fn preset3(&self) {
        self.apply_preset(Preset::MiddleBand);
    }

    pub fn preset4(&self) {
        self.apply_preset(Preset::EvenCells);
    }

    /// Apply a seed specification. Does not stop a running schedule.
    pub fn apply_seed(&self, seed: &Seed) -> Result<(), GridError> {
        self.lock().apply_seed(seed)
    }

    /// Install an explicit state. Does not stop a running schedule.
    pub fn set_state(&self, state: GridState) -> Result<(), GridError> {
        self.lock().set_state(state)
    }
}

impl<S: Scheduler> Drop for Game<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn acquire<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
