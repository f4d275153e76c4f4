//! Wall-clock scheduler backed by one worker thread per schedule.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::{CancelToken, ScheduleError, ScheduleHandle, Scheduler, Task, check_interval};

/// Fires ticks from a dedicated thread.
///
/// Ticks of one schedule run sequentially. When a tick overruns, the missed
/// deadlines are skipped and the next tick is due one interval later.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(
        &self,
        interval: Duration,
        token: CancelToken,
        mut task: Task,
    ) -> Result<ScheduleHandle, ScheduleError> {
        check_interval(interval)?;

        let (waker, sleeper) = mpsc::channel::<()>();
        let worker_token = token.clone();

        thread::Builder::new()
            .name("life-ticker".into())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match sleeper.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // Handle cancelled or dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if worker_token.is_cancelled() {
                        break;
                    }

                    task();

                    deadline += interval;
                    let now = Instant::now();
                    if deadline <= now {
                        let behind = now - deadline;
                        let skipped = behind.as_nanos() / interval.as_nanos() + 1;
                        log::debug!("Tick overran, skipping {} tick(s)", skipped);
                        deadline = now + interval;
                    }
                }
                log::trace!("Tick thread exiting");
            })?;

        Ok(ScheduleHandle::with_waker(token, waker))
    }
}
