//! Configuration management module
//!
//! This module handles loading, saving, and managing debounce settings.
//! Settings are stored as JSON with atomic writes to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::SettingsManager;
pub use models::{FormSettings, InputSettings, TeardownPolicy};
