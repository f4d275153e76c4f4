//! Virtual-time scheduler driven by explicit [`ManualScheduler::advance`] calls.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{CancelToken, ScheduleError, ScheduleHandle, Scheduler, Task, check_interval};

struct Entry {
    id: u64,
    interval: Duration,
    due: Duration,
    token: CancelToken,
    /// Taken out while the task runs so the clock lock is not held.
    task: Option<Task>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Scheduler whose clock only moves when told to.
///
/// Clones share the same clock, so a test can keep one clone and hand the
/// other to the code under test.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of schedules not yet cancelled.
    pub fn active(&self) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .count()
    }

    /// Move the clock forward, firing every tick that falls due, earliest
    /// first. Returns the number of ticks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            let (id, token, mut task) = {
                let mut clock = self.lock();
                clock.entries.retain(|e| !e.token.is_cancelled());

                let next = clock
                    .entries
                    .iter_mut()
                    .filter(|e| e.due <= target && e.task.is_some())
                    .min_by_key(|e| e.due);
                let Some(entry) = next else {
                    clock.now = target;
                    break;
                };

                let due = entry.due;
                entry.due += entry.interval;
                let id = entry.id;
                let token = entry.token.clone();
                let Some(task) = entry.task.take() else {
                    continue;
                };
                clock.now = due;
                (id, token, task)
            };

            if !token.is_cancelled() {
                task();
                fired += 1;
            }

            if let Some(entry) = self.lock().entries.iter_mut().find(|e| e.id == id) {
                entry.task = Some(task);
            }
        }

        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(
        &self,
        interval: Duration,
        token: CancelToken,
        task: Task,
    ) -> Result<ScheduleHandle, ScheduleError> {
        check_interval(interval)?;

        let mut clock = self.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + interval;
        clock.entries.push(Entry {
            id,
            interval,
            due,
            token: token.clone(),
            task: Some(task),
        });

        Ok(ScheduleHandle::new(token))
    }
}
