//! Debounced input controller module
//!
//! This module implements the state machine behind a debounced form field:
//! local mirroring of edits, a coalesced delayed commit to the host's store,
//! and resynchronization when the store changes underneath.
//!
//! # Overview
//!
//! - **Mirrors every edit** into the displayed value synchronously
//! - **Coalesces commits** so one value reaches the store per quiet period
//! - **Resynchronizes** the display when the external value changes
//! - **Flushes on blur** when configured
//! - **Clears** synchronously, bypassing the debounce
//!
//! # Architecture
//!
//! - `DebouncedInput`: per-field controller, re-driven by the host via `update`
//! - `Debouncer`: trailing-edge debounced function on a `Scheduler`
//! - `ChangeHandler` / `ClearHandler`: stable handles the host binds to its element
//! - `ChangeEvent` / `TargetValue`: default event shape and value extraction
//!
//! # Event Flow
//!
//! ```text
//! keystroke → ChangeHandler → local display (now)
//!                  ↓
//!              Debouncer ──(timeout / flush)──→ handle_change(path, value)
//!                                                     ↓
//!                          host store → InputProps.data → update() → resync
//! ```
//!
//! # Handler Identity
//!
//! The debounced function survives `update` calls until the change handler,
//! path or timeout changes; then the old one is cancelled and closed. The
//! change handler is also rebuilt when the extractor or default value changes,
//! the clear handler when the default value changes. Closures are compared by
//! `Arc` pointer identity.

pub mod debouncer;
pub mod event;
pub mod input;
pub mod path;

pub use debouncer::Debouncer;
pub use event::{
    ChangeEvent, EventTarget, EventToValue, TargetValue, default_event_to_value, event_to_value,
};
pub use input::{
    ChangeFn, ChangeHandler, ClearHandler, DebouncedInput, InputBinding, InputProps, change_fn,
};
pub use path::FieldPath;
