//! Configuration data models
//!
//! This module defines the debounce settings that can be loaded from disk. Only
//! plain data lives here; closures such as the change handler and the event
//! extractor are supplied in code through `InputProps`.

use crate::controller::FieldPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default quiescence window in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 300;

/// What happens to a pending commit when its field is torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownPolicy {
    /// Abandon the pending commit
    #[default]
    Cancel,
    /// Commit the pending value immediately
    Flush,
}

/// Debounce behavior for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Quiescence window before a pending value commits
    pub timeout_ms: u64,
    /// Whether losing focus commits a pending value immediately
    pub flush_on_blur: bool,
    /// Pending-commit handling on unmount
    pub teardown: TeardownPolicy,
}

/// Debounce settings for a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Settings used by fields without an override
    pub defaults: InputSettings,
    /// Per-field overrides keyed by path
    pub fields: HashMap<String, InputSettings>,
}

impl InputSettings {
    /// Quiescence window as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            flush_on_blur: false,
            teardown: TeardownPolicy::Cancel,
        }
    }
}

impl FormSettings {
    /// Settings for `path`, falling back to the form defaults
    pub fn for_path(&self, path: &FieldPath) -> &InputSettings {
        self.fields.get(path.as_str()).unwrap_or(&self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = InputSettings::default();
        assert_eq!(settings.timeout(), Duration::from_millis(300));
        assert!(!settings.flush_on_blur);
        assert_eq!(settings.teardown, TeardownPolicy::Cancel);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: FormSettings =
            serde_json::from_str(r#"{"fields": {"notes": {"flush_on_blur": true}}}"#).unwrap();
        let notes = settings.for_path(&FieldPath::from("notes"));
        assert!(notes.flush_on_blur);
        assert_eq!(notes.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_for_path_falls_back_to_defaults() {
        let mut settings = FormSettings::default();
        settings.defaults.timeout_ms = 500;
        settings.fields.insert(
            "search".to_string(),
            InputSettings {
                timeout_ms: 150,
                ..InputSettings::default()
            },
        );

        assert_eq!(settings.for_path(&FieldPath::from("search")).timeout_ms, 150);
        assert_eq!(settings.for_path(&FieldPath::from("title")).timeout_ms, 500);
    }

    #[test]
    fn test_teardown_policy_serialization() {
        let json = serde_json::to_string(&TeardownPolicy::Flush).unwrap();
        assert_eq!(json, "\"flush\"");
    }

    #[test]
    fn test_serialization() {
        let settings = FormSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: FormSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, deserialized);
    }
}
