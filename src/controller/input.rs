//! Debounced input controller
//!
//! [`DebouncedInput`] keeps three things in step for one editable field:
//!
//! - the external value owned by the host's store,
//! - the locally displayed value, updated on every keystroke,
//! - a pending commit that forwards the latest local value to the store once
//!   the field has been quiet for the configured timeout.
//!
//! The host re-runs [`DebouncedInput::update`] whenever any of its inputs
//! change. Each run is the chance to notice an external value change, rebuild
//! handlers whose dependencies moved, and flush on blur.

use super::debouncer::Debouncer;
use super::event::{EventToValue, TargetValue, default_event_to_value};
use super::path::FieldPath;
use crate::config::models::{DEFAULT_TIMEOUT_MS, InputSettings, TeardownPolicy};
use crate::error::Result;
use crate::scheduler::Scheduler;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// External change handler: receives the field path and the committed value
///
/// `None` means the field was cleared.
pub type ChangeFn<V> = Arc<dyn Fn(&FieldPath, Option<V>) + Send + Sync>;

/// Wrap a closure as a [`ChangeFn`]
pub fn change_fn<V, F>(handler: F) -> ChangeFn<V>
where
    F: Fn(&FieldPath, Option<V>) + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Inputs the host passes on every [`DebouncedInput::update`]
pub struct InputProps<E, V> {
    /// Handler receiving committed values
    pub handle_change: ChangeFn<V>,
    /// Current external value
    pub data: Option<V>,
    /// Field this controller is bound to
    pub path: FieldPath,
    /// Extracts the value from a change event
    pub event_to_value: EventToValue<E, V>,
    /// Displayed when there is no value
    pub default_value: V,
    /// Commit immediately when the field loses focus
    pub flush_on_blur: bool,
    /// Whether the field currently has focus
    pub focused: bool,
    /// Quiescence window before a pending value commits
    pub timeout: Duration,
}

impl<E, V> InputProps<E, V>
where
    E: TargetValue<V> + 'static,
    V: Default + 'static,
{
    /// Props with the default extractor reading the event's target value
    pub fn new(path: impl Into<FieldPath>, data: Option<V>, handle_change: ChangeFn<V>) -> Self {
        Self::with_extractor(path, data, handle_change, default_event_to_value())
    }
}

impl<E, V: Default> InputProps<E, V> {
    /// Props with a custom event extractor
    pub fn with_extractor(
        path: impl Into<FieldPath>,
        data: Option<V>,
        handle_change: ChangeFn<V>,
        event_to_value: EventToValue<E, V>,
    ) -> Self {
        Self {
            handle_change,
            data,
            path: path.into(),
            event_to_value,
            default_value: V::default(),
            flush_on_blur: false,
            focused: false,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl<E, V> InputProps<E, V> {
    /// Replace the external value
    #[must_use]
    pub fn data(mut self, data: Option<V>) -> Self {
        self.data = data;
        self
    }

    /// Replace the value shown when there is none
    #[must_use]
    pub fn default_value(mut self, default_value: V) -> Self {
        self.default_value = default_value;
        self
    }

    /// Enable or disable commit on blur
    #[must_use]
    pub fn flush_on_blur(mut self, flush_on_blur: bool) -> Self {
        self.flush_on_blur = flush_on_blur;
        self
    }

    /// Set the current focus state
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the quiescence window
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the event extractor
    #[must_use]
    pub fn event_to_value(mut self, event_to_value: EventToValue<E, V>) -> Self {
        self.event_to_value = event_to_value;
        self
    }

    /// Apply timeout and blur behavior from loaded settings
    #[must_use]
    pub fn settings(mut self, settings: &InputSettings) -> Self {
        self.timeout = settings.timeout();
        self.flush_on_blur = settings.flush_on_blur;
        self
    }
}

impl<E, V: Clone> Clone for InputProps<E, V> {
    fn clone(&self) -> Self {
        Self {
            handle_change: Arc::clone(&self.handle_change),
            data: self.data.clone(),
            path: self.path.clone(),
            event_to_value: Arc::clone(&self.event_to_value),
            default_value: self.default_value.clone(),
            flush_on_blur: self.flush_on_blur,
            focused: self.focused,
            timeout: self.timeout,
        }
    }
}

/// What the host binds to its input element
pub struct InputBinding<E, V> {
    /// Value to display
    pub value: V,
    /// Attach to the element's change event
    pub on_change: Arc<ChangeHandler<E, V>>,
    /// Attach to the element's clear action
    pub on_clear: Arc<ClearHandler<V>>,
}

impl<E, V> InputBinding<E, V> {
    /// Split into `(value, on_change, on_clear)`
    pub fn into_parts(self) -> (V, Arc<ChangeHandler<E, V>>, Arc<ClearHandler<V>>) {
        (self.value, self.on_change, self.on_clear)
    }
}

/// Change-event handler returned by [`DebouncedInput::update`]
pub struct ChangeHandler<E, V> {
    path: FieldPath,
    event_to_value: EventToValue<E, V>,
    default_value: V,
    local: Arc<Mutex<V>>,
    debouncer: Debouncer<Option<V>>,
}

impl<E, V> ChangeHandler<E, V>
where
    V: Clone + Send + 'static,
{
    /// Mirror the event's value locally and schedule its commit
    ///
    /// The display updates synchronously. The commit is debounced: each call
    /// restarts the timeout and only the last value is forwarded. An extractor
    /// error is returned as-is and changes nothing.
    pub fn call(&self, event: &E) -> Result<()> {
        let new_value = (self.event_to_value)(event)?;
        *self.local.lock() = new_value
            .clone()
            .unwrap_or_else(|| self.default_value.clone());
        trace!("Change on {}, commit rescheduled", self.path);
        self.debouncer.call(new_value);
        Ok(())
    }
}

/// Clear handler returned by [`DebouncedInput::update`]
pub struct ClearHandler<V> {
    path: FieldPath,
    default_value: V,
    local: Arc<Mutex<V>>,
    handle_change: ChangeFn<V>,
}

impl<V: Clone> ClearHandler<V> {
    /// Reset the display and commit "no value" immediately
    ///
    /// Bypasses the debounce and leaves any pending commit alone: a value typed
    /// before the clear still commits when its timer fires.
    pub fn call(&self) {
        *self.local.lock() = self.default_value.clone();
        trace!("Clear on {}", self.path);
        (self.handle_change)(&self.path, None);
    }
}

/// Debounced commit function and the props it was built from
struct CommitSlot<V> {
    handle_change: ChangeFn<V>,
    path: FieldPath,
    timeout: Duration,
    debouncer: Debouncer<Option<V>>,
}

impl<V> CommitSlot<V> {
    fn matches<E>(&self, props: &InputProps<E, V>) -> bool {
        Arc::ptr_eq(&self.handle_change, &props.handle_change)
            && self.path == props.path
            && self.timeout == props.timeout
    }
}

struct ChangeSlot<E, V> {
    epoch: u64,
    event_to_value: EventToValue<E, V>,
    default_value: V,
    handler: Arc<ChangeHandler<E, V>>,
}

struct ClearSlot<V> {
    epoch: u64,
    default_value: V,
    handler: Arc<ClearHandler<V>>,
}

/// Inputs of the blur effect; the effect runs when these change
#[derive(Clone, Copy, PartialEq, Eq)]
struct BlurDeps {
    focused: bool,
    flush_on_blur: bool,
    epoch: u64,
}

/// Controller for one debounced editable field
pub struct DebouncedInput<E, V>
where
    V: Clone + Send + 'static,
{
    scheduler: Arc<dyn Scheduler>,
    teardown: TeardownPolicy,
    local: Arc<Mutex<V>>,
    /// External value seen on the last update
    observed: Option<V>,
    commit: Option<CommitSlot<V>>,
    /// Bumped whenever the debounced function is rebuilt
    epoch: u64,
    change: Option<ChangeSlot<E, V>>,
    clear: Option<ClearSlot<V>>,
    blur_deps: Option<BlurDeps>,
    torn_down: bool,
}

impl<E, V> DebouncedInput<E, V>
where
    E: 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Mount a field, seeding the display from `props`
    ///
    /// Nothing is bound yet; call [`update`](Self::update) to obtain handlers.
    pub fn mount(scheduler: Arc<dyn Scheduler>, props: &InputProps<E, V>) -> Self {
        let initial = props
            .data
            .clone()
            .unwrap_or_else(|| props.default_value.clone());
        debug!("Mounting debounced input for {}", props.path);

        Self {
            scheduler,
            teardown: TeardownPolicy::default(),
            local: Arc::new(Mutex::new(initial)),
            observed: props.data.clone(),
            commit: None,
            epoch: 0,
            change: None,
            clear: None,
            blur_deps: None,
            torn_down: false,
        }
    }

    /// Choose what happens to a pending commit on unmount
    #[must_use]
    pub fn with_teardown(mut self, teardown: TeardownPolicy) -> Self {
        self.teardown = teardown;
        self
    }

    /// Re-run the controller against the host's current props
    ///
    /// Returns the value to display and the handlers to bind. Handlers are the
    /// same `Arc`s as last time unless one of their dependencies changed.
    pub fn update(&mut self, props: &InputProps<E, V>) -> InputBinding<E, V> {
        self.resync(props);
        let debouncer = self.ensure_commit(props);
        let on_change = self.ensure_change_handler(props, &debouncer);
        let on_clear = self.ensure_clear_handler(props);
        self.apply_blur(props, &debouncer);

        InputBinding {
            value: self.display_value(),
            on_change,
            on_clear,
        }
    }

    /// Value currently displayed
    pub fn display_value(&self) -> V {
        self.local.lock().clone()
    }

    /// Commit any pending value now
    pub fn flush(&self) -> bool {
        self.commit.as_ref().is_some_and(|slot| slot.debouncer.flush())
    }

    /// Abandon any pending value
    pub fn cancel(&self) -> bool {
        self.commit.as_ref().is_some_and(|slot| slot.debouncer.cancel())
    }

    /// Whether a commit is waiting for its timeout
    pub fn has_pending_commit(&self) -> bool {
        self.commit
            .as_ref()
            .is_some_and(|slot| slot.debouncer.is_pending())
    }

    /// Tear the field down, applying the teardown policy
    ///
    /// Handlers still held by the host keep updating the display cell but can
    /// no longer reach the change handler.
    pub fn unmount(mut self) {
        self.tear_down();
    }

    fn resync(&mut self, props: &InputProps<E, V>) {
        if self.observed == props.data {
            return;
        }
        debug!("External value of {} changed, resynchronizing", props.path);
        *self.local.lock() = props
            .data
            .clone()
            .unwrap_or_else(|| props.default_value.clone());
        self.observed = props.data.clone();
    }

    fn ensure_commit(&mut self, props: &InputProps<E, V>) -> Debouncer<Option<V>> {
        if let Some(slot) = self.commit.as_ref().filter(|slot| slot.matches(props)) {
            return slot.debouncer.clone();
        }

        if let Some(old) = self.commit.take() {
            debug!(
                "Rebuilding debounced commit for {} (handler, path or timeout changed)",
                props.path
            );
            old.debouncer.close();
        }

        let handle_change = Arc::clone(&props.handle_change);
        let path = props.path.clone();
        let debouncer = Debouncer::new(props.timeout, Arc::clone(&self.scheduler), {
            let handle_change = Arc::clone(&handle_change);
            let path = path.clone();
            move |value: Option<V>| {
                debug!("Committing debounced value for {}", path);
                handle_change(&path, value);
            }
        });

        self.epoch += 1;
        self.commit = Some(CommitSlot {
            handle_change,
            path,
            timeout: props.timeout,
            debouncer: debouncer.clone(),
        });
        debouncer
    }

    fn ensure_change_handler(
        &mut self,
        props: &InputProps<E, V>,
        debouncer: &Debouncer<Option<V>>,
    ) -> Arc<ChangeHandler<E, V>> {
        if let Some(slot) = &self.change {
            if slot.epoch == self.epoch
                && Arc::ptr_eq(&slot.event_to_value, &props.event_to_value)
                && slot.default_value == props.default_value
            {
                return Arc::clone(&slot.handler);
            }
        }

        let handler = Arc::new(ChangeHandler {
            path: props.path.clone(),
            event_to_value: Arc::clone(&props.event_to_value),
            default_value: props.default_value.clone(),
            local: Arc::clone(&self.local),
            debouncer: debouncer.clone(),
        });
        self.change = Some(ChangeSlot {
            epoch: self.epoch,
            event_to_value: Arc::clone(&props.event_to_value),
            default_value: props.default_value.clone(),
            handler: Arc::clone(&handler),
        });
        handler
    }

    fn ensure_clear_handler(&mut self, props: &InputProps<E, V>) -> Arc<ClearHandler<V>> {
        if let Some(slot) = &self.clear {
            if slot.epoch == self.epoch && slot.default_value == props.default_value {
                return Arc::clone(&slot.handler);
            }
        }

        let handler = Arc::new(ClearHandler {
            path: props.path.clone(),
            default_value: props.default_value.clone(),
            local: Arc::clone(&self.local),
            handle_change: Arc::clone(&props.handle_change),
        });
        self.clear = Some(ClearSlot {
            epoch: self.epoch,
            default_value: props.default_value.clone(),
            handler: Arc::clone(&handler),
        });
        handler
    }

    fn apply_blur(&mut self, props: &InputProps<E, V>, debouncer: &Debouncer<Option<V>>) {
        let deps = BlurDeps {
            focused: props.focused,
            flush_on_blur: props.flush_on_blur,
            epoch: self.epoch,
        };
        if self.blur_deps == Some(deps) {
            return;
        }
        self.blur_deps = Some(deps);

        if !props.focused && props.flush_on_blur && debouncer.flush() {
            debug!("Flushed pending commit for {} on blur", props.path);
        }
    }
}

impl<E, V> DebouncedInput<E, V>
where
    V: Clone + Send + 'static,
{
    fn tear_down(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let Some(slot) = &self.commit else {
            return;
        };
        match self.teardown {
            TeardownPolicy::Cancel => {
                if slot.debouncer.cancel() {
                    debug!("Pending commit for {} abandoned on unmount", slot.path);
                }
            }
            TeardownPolicy::Flush => {
                if slot.debouncer.flush() {
                    debug!("Pending commit for {} flushed on unmount", slot.path);
                }
            }
        }
        slot.debouncer.close();
    }
}

impl<E, V> Drop for DebouncedInput<E, V>
where
    V: Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.tear_down();
    }
}
