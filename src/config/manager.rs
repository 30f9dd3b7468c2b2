//! Settings manager for loading and saving debounce configuration
//!
//! Settings live in a JSON file. The location comes from the
//! `DEBOUNCED_INPUT_CONFIG` environment variable, or `debounced-input.json` in
//! the working directory. Writes are atomic to prevent corruption.

use crate::config::models::FormSettings;
use crate::error::{DebounceError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV_VAR: &str = "DEBOUNCED_INPUT_CONFIG";

/// File name used when no override is set
const DEFAULT_FILE_NAME: &str = "debounced-input.json";

/// Settings manager
pub struct SettingsManager;

impl SettingsManager {
    /// Get the path to the settings file
    pub fn get_config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_FILE_NAME), PathBuf::from)
    }

    /// Load settings from the default location
    pub fn load() -> Result<FormSettings> {
        Self::load_from(&Self::get_config_path())
    }

    /// Save settings to the default location
    pub fn save(settings: &FormSettings) -> Result<()> {
        Self::save_to(&Self::get_config_path(), settings)
    }

    /// Load settings from `path`
    ///
    /// A missing or unparsable file yields default settings.
    pub fn load_from(path: &Path) -> Result<FormSettings> {
        if !path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(FormSettings::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str(&json) {
            Ok(settings) => {
                info!("Settings loaded from {}", path.display());
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to parse settings, using defaults: {}", e);
                Ok(FormSettings::default())
            }
        }
    }

    /// Save settings to `path` with an atomic write
    ///
    /// Uses a temporary file and rename to ensure atomic write operation.
    pub fn save_to(path: &Path, settings: &FormSettings) -> Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            DebounceError::ConfigError(StringError::new("Invalid settings path"))
        })?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir)?;
                dir.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        // Atomic write: write to temp file, then rename
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = dir.join(temp_name);
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, path)?;

        info!("Settings saved to {}", path.display());
        Ok(())
    }
}
