//! Virtual-clock scheduler driven by the host event loop

use super::{Scheduler, TimerId, TimerTask};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::trace;

/// Scheduler whose clock only moves when the host calls [`advance`](Self::advance)
///
/// Time starts at zero. Tasks are ordered by deadline, ties broken by the order
/// they were scheduled in.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

#[derive(Default)]
struct ManualState {
    /// Current virtual time since creation
    now: Duration,
    next_id: u64,
    /// Queued tasks keyed by (deadline, id)
    timers: BTreeMap<(Duration, u64), TimerTask>,
    /// Deadline lookup for cancellation
    deadlines: HashMap<u64, Duration>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of tasks waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Move the clock forward by `by`, running every task that falls due
    ///
    /// The clock is set to each task's deadline before the task runs, so a task
    /// observing [`now`](Self::now) sees its own firing time. Tasks scheduled by
    /// running tasks fire within the same call if they fall inside the window.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        while let Some(task) = self.pop_due(target) {
            task();
            fired += 1;
        }

        let mut state = self.state.lock();
        if state.now < target {
            state.now = target;
        }
        fired
    }

    /// Run tasks until the queue is empty, jumping the clock to each deadline
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let next_deadline = self.state.lock().timers.keys().next().map(|&(at, _)| at);
            let Some(at) = next_deadline else {
                return fired;
            };
            let by = at.saturating_sub(self.now());
            fired += self.advance(by);
        }
    }

    fn pop_due(&self, target: Duration) -> Option<TimerTask> {
        let mut state = self.state.lock();
        let (&(at, id), _) = state.timers.iter().next()?;
        if at > target {
            return None;
        }
        let task = state.timers.remove(&(at, id))?;
        state.deadlines.remove(&id);
        state.now = state.now.max(at);
        trace!("Virtual timer {} firing at {:?}", id, at);
        Some(task)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let at = state.now + delay;
        state.timers.insert((at, id), task);
        state.deadlines.insert(id, at);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.lock();
        match state.deadlines.remove(&id.0) {
            Some(at) => state.timers.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }
}
