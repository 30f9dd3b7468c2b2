//! Error types for `debounced-input`
//!
//! The debounce machinery itself has no recoverable failure modes. Errors come
//! from the edges: a caller-supplied event extractor, the settings file, the
//! timer thread and logging setup.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for debounced input controllers
#[derive(Debug, Error)]
pub enum DebounceError {
    /// A caller-supplied `event_to_value` function rejected the event
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to extract value from event: {0}")]
    EventExtraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The timer backend could not be started
    #[error("Timer scheduler error: {0}")]
    SchedulerError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging could not be initialized
    #[error("Logging initialization failed: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DebounceError {
    /// Wrap any error raised while extracting a value from a change event
    pub fn extraction<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::EventExtraction(err.into())
    }
}

/// Result type alias for `debounced-input` operations
pub type Result<T> = std::result::Result<T, DebounceError>;

/// Convert an error to a message suitable for an end user
///
/// Hosts show this text next to the field or in a status line; the full chain
/// still goes to the log.
pub fn get_user_friendly_error(error: &DebounceError) -> String {
    match error {
        DebounceError::EventExtraction(e) => {
            format!("The input could not be read:\n\n{e}\n\nThe last value was kept.")
        }
        DebounceError::ConfigError(_) => "Failed to load or save debounce settings.\n\n\
             Default settings are in effect.\n\
             Check the file referenced by DEBOUNCED_INPUT_CONFIG."
            .to_string(),
        DebounceError::SchedulerError(_) => "The commit timer could not be started.\n\n\
             Changes will not be saved automatically."
            .to_string(),
        DebounceError::LoggingError(_) => "Logging could not be initialized.\n\n\
             The application will continue without a log."
            .to_string(),
        DebounceError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        DebounceError::JsonError(e) => {
            format!(
                "Settings file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
