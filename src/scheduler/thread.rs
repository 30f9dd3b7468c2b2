//! Wall-clock scheduler backed by a dedicated timer thread
//!
//! One thread per scheduler sleeps on a condition variable until the earliest
//! deadline, then runs the due task with the queue unlocked. Scheduling a task
//! with an earlier deadline wakes the thread so it can re-arm.

use super::{Scheduler, TimerId, TimerTask};
use crate::error::{DebounceError, Result};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Name given to the timer thread
const THREAD_NAME: &str = "debounce-timer";

/// Scheduler that fires tasks from a background thread
///
/// Dropping the scheduler stops the thread. Tasks that have not fired by then
/// are discarded without running.
pub struct ThreadScheduler {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    state: Mutex<ThreadState>,
    wakeup: Condvar,
}

#[derive(Default)]
struct ThreadState {
    next_id: u64,
    timers: BTreeMap<(Instant, u64), TimerTask>,
    deadlines: HashMap<u64, Instant>,
    shutdown: bool,
}

impl ThreadScheduler {
    /// Spawn the timer thread
    pub fn new() -> Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(ThreadState::default()),
            wakeup: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run_timer_loop(&worker_shared))
            .map_err(|e| {
                use tracing::error;
                error!("Failed to spawn timer thread: {e}");
                // Preserve error chain by wrapping the source error
                DebounceError::SchedulerError(Box::new(e))
            })?;

        info!("Timer thread started");
        Ok(Self {
            shared,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Number of tasks waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.shared.state.lock().timers.len()
    }

    /// Stop the timer thread and discard unfired tasks
    ///
    /// Called automatically on drop. Safe to call from inside a task.
    pub fn shutdown(&self) {
        let discarded = {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            state.deadlines.clear();
            std::mem::take(&mut state.timers)
        };
        self.shared.wakeup.notify_all();
        if !discarded.is_empty() {
            debug!("Discarding {} unfired timer(s) on shutdown", discarded.len());
        }
        drop(discarded);

        let Some(handle) = self.worker.lock().take() else {
            return;
        };
        // Joining from the timer thread itself would deadlock
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            tracing::warn!("Timer thread panicked before shutdown");
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let at = Instant::now() + delay;
        let mut state = self.shared.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        if state.shutdown {
            trace!("Timer {} dropped, scheduler is shut down", id);
            return TimerId(id);
        }
        state.timers.insert((at, id), task);
        state.deadlines.insert(id, at);
        drop(state);
        self.shared.wakeup.notify_one();
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.shared.state.lock();
        match state.deadlines.remove(&id.0) {
            Some(at) => state.timers.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_timer_loop(shared: &Shared) {
    let mut state = shared.state.lock();
    loop {
        if state.shutdown {
            break;
        }
        let next = state.timers.keys().next().copied();
        match next {
            None => {
                shared.wakeup.wait(&mut state);
            }
            Some((at, id)) if at <= Instant::now() => {
                let task = state.timers.remove(&(at, id));
                state.deadlines.remove(&id);
                if let Some(task) = task {
                    trace!("Timer {} firing", id);
                    MutexGuard::unlocked(&mut state, task);
                }
            }
            Some((at, _)) => {
                shared.wakeup.wait_until(&mut state, at);
            }
        }
    }
    debug!("Timer thread exiting");
}
