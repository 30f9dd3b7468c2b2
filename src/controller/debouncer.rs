//! Trailing-edge debounced function
//!
//! Each [`Debouncer::call`] replaces the pending value and restarts the wait.
//! When the wait elapses without another call, the callback receives the last
//! value. At most one commit is ever pending.

use crate::scheduler::{Scheduler, TimerId};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

type Callback<T> = Box<dyn Fn(T) + Send + Sync>;

/// Coalesces bursts of calls into one delayed callback invocation
///
/// Cloning yields another handle to the same pending state and timer.
pub struct Debouncer<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    wait: Duration,
    scheduler: Arc<dyn Scheduler>,
    callback: Callback<T>,
    state: Mutex<PendingState<T>>,
}

struct PendingState<T> {
    timer: Option<TimerId>,
    value: Option<T>,
    /// Bumped on every call so a timer racing a newer call fires as a no-op
    generation: u64,
    closed: bool,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Debounce `callback` by `wait` on `scheduler`
    pub fn new<F>(wait: Duration, scheduler: Arc<dyn Scheduler>, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                wait,
                scheduler,
                callback: Box::new(callback),
                state: Mutex::new(PendingState {
                    timer: None,
                    value: None,
                    generation: 0,
                    closed: false,
                }),
            }),
        }
    }

    /// Quiescence window
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    /// Store `value` and restart the wait
    ///
    /// Any pending timer is cancelled first, so only the latest value survives.
    /// Ignored once the debouncer is closed.
    pub fn call(&self, value: T) {
        let mut state = self.inner.state.lock();
        if state.closed {
            debug!("Debounced call ignored, debouncer is closed");
            return;
        }
        if let Some(timer) = state.timer.take() {
            self.inner.scheduler.cancel(timer);
            trace!("Superseded pending {}", timer);
        }

        state.generation += 1;
        state.value = Some(value);

        let generation = state.generation;
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let timer = self.inner.scheduler.schedule(
            self.inner.wait,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(generation);
                }
            }),
        );
        state.timer = Some(timer);
        trace!("Scheduled {} in {:?}", timer, self.inner.wait);
    }

    /// Commit the pending value now instead of waiting
    ///
    /// Returns `true` if a value was pending and the callback ran.
    pub fn flush(&self) -> bool {
        let value = {
            let mut state = self.inner.state.lock();
            match state.timer.take() {
                Some(timer) => {
                    self.inner.scheduler.cancel(timer);
                    state.value.take()
                }
                None => None,
            }
        };

        match value {
            Some(value) => {
                debug!("Flushing pending commit");
                (self.inner.callback)(value);
                true
            }
            None => false,
        }
    }
}

impl<T> Debouncer<T> {
    /// Drop the pending value without invoking the callback
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&self) -> bool {
        self.inner.cancel_pending()
    }

    /// Cancel and refuse all further calls
    ///
    /// A closed debouncer never invokes its callback again, including through
    /// clones held elsewhere.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        state.closed = true;
        state.value = None;
        if let Some(timer) = state.timer.take() {
            self.inner.scheduler.cancel(timer);
        }
    }

    /// Whether a commit is waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Whether two handles share the same timer state
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Inner<T> {
    fn fire(&self, generation: u64) {
        let value = {
            let mut state = self.state.lock();
            if state.generation != generation || state.timer.is_none() {
                trace!("Stale timer for generation {} ignored", generation);
                return;
            }
            state.timer = None;
            state.value.take()
        };

        if let Some(value) = value {
            (self.callback)(value);
        }
    }

    fn cancel_pending(&self) -> bool {
        let mut state = self.state.lock();
        state.value = None;
        match state.timer.take() {
            Some(timer) => {
                self.scheduler.cancel(timer);
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            self.scheduler.cancel(timer);
        }
    }
}
