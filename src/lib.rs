//! `debounced-input` - Debounced value commits for editable form controls
//!
//! Buffers rapid edits to a form field, mirrors them instantly into the
//! displayed value, and forwards one coalesced value to the host's change
//! handler once the field has been quiet for a configurable window. Flush on
//! blur and an immediate clear are supported.
//!
//! The host re-drives a [`DebouncedInput`] on every render with the current
//! external value and configuration, binds the returned handlers to its input
//! element, and runs timers through a [`scheduler::Scheduler`]: either a
//! [`ManualScheduler`] advanced by its own event loop, or a
//! [`ThreadScheduler`] firing from a background thread.
//!
//! # Example
//!
//! ```
//! use debounced_input::{ChangeEvent, DebouncedInput, InputProps, ManualScheduler, change_fn};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let handler = change_fn(|path, value: Option<String>| println!("{path} = {value:?}"));
//! let props: InputProps<ChangeEvent<String>, String> =
//!     InputProps::new("user.name", Some("Ada".to_string()), handler);
//!
//! let mut input = DebouncedInput::mount(scheduler.clone(), &props);
//! let binding = input.update(&props);
//! binding.on_change.call(&ChangeEvent::new("Ada L")).unwrap();
//! assert_eq!(input.display_value(), "Ada L");
//!
//! scheduler.advance(Duration::from_millis(300)); // prints: user.name = Some("Ada L")
//! ```

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod scheduler;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::{FormSettings, InputSettings, SettingsManager, TeardownPolicy};
pub use controller::{
    ChangeEvent, ChangeFn, DebouncedInput, Debouncer, FieldPath, InputBinding, InputProps,
    change_fn, event_to_value,
};
pub use error::{DebounceError, Result};
pub use scheduler::{ManualScheduler, Scheduler, ThreadScheduler};
