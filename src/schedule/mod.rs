//! Periodic tick scheduling.
//!
//! A [`Scheduler`] fires a task once per interval until its
//! [`ScheduleHandle`] is cancelled. [`ThreadScheduler`] uses the wall clock
//! and a worker thread; [`ManualScheduler`] runs on virtual time advanced
//! explicitly, for deterministic tests.

mod manual;
mod thread;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use thread::ThreadScheduler;

/// Work run on every tick.
pub type Task = Box<dyn FnMut() + Send>;

/// Error type for scheduling.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Tick interval must be positive")]
    InvalidInterval,

    #[error("Failed to spawn tick thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not yet cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark cancelled. Visible to every clone.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle to a running schedule. Cancels on drop.
#[derive(Debug)]
pub struct ScheduleHandle {
    token: CancelToken,
    /// Dropping the sender wakes a sleeping worker thread.
    waker: Option<Sender<()>>,
}

impl ScheduleHandle {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            waker: None,
        }
    }

    pub(crate) fn with_waker(token: CancelToken, waker: Sender<()>) -> Self {
        Self {
            token,
            waker: Some(waker),
        }
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
        self.waker.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of periodic ticks.
pub trait Scheduler {
    /// Run `task` every `interval` until `token` is cancelled.
    ///
    /// Implementations never run two ticks of one schedule concurrently and
    /// never queue missed ticks.
    fn schedule(
        &self,
        interval: Duration,
        token: CancelToken,
        task: Task,
    ) -> Result<ScheduleHandle, ScheduleError>;
}

fn check_interval(interval: Duration) -> Result<(), ScheduleError> {
    if interval.is_zero() {
        return Err(ScheduleError::InvalidInterval);
    }
    Ok(())
}
