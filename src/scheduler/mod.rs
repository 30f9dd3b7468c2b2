//! Deferred task scheduling
//!
//! The debouncer never sleeps or spawns on its own. It hands a boxed task to a
//! [`Scheduler`] together with a delay and keeps the returned [`TimerId`] so the
//! task can be cancelled when a newer interaction supersedes it.
//!
//! # Implementations
//!
//! - [`ManualScheduler`]: a virtual clock advanced by the host's event loop.
//!   Every task runs on the thread that calls [`ManualScheduler::advance`],
//!   which matches the single-threaded, cooperative model of a UI loop and
//!   makes timing fully deterministic in tests.
//! - [`ThreadScheduler`]: a background timer thread that fires tasks at
//!   wall-clock deadlines. Use it when nothing drives a loop explicitly.
//!
//! # Contract
//!
//! - A task fires at most once, no earlier than its delay after scheduling.
//! - `cancel` on a fired or unknown id is a no-op returning `false`.
//! - Tasks run with no scheduler lock held, so they may schedule or cancel
//!   other tasks.

pub mod manual;
pub mod thread;

pub use manual::ManualScheduler;
pub use thread::ThreadScheduler;

use std::fmt;
use std::time::Duration;

/// A deferred unit of work
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle identifying one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id, unique per scheduler
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of delayed task execution
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerId;

    /// Cancel a task that has not fired yet
    ///
    /// Returns `true` if the task was still queued.
    fn cancel(&self, id: TimerId) -> bool;
}
