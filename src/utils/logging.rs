//! Logging system initialization
//!
//! Sets up tracing-based logging to stderr, or to `debounced-input.log` in a
//! given directory.

use crate::error::{DebounceError, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Log file name prefix used when logging to a directory
const LOG_FILE_PREFIX: &str = "debounced-input";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
/// With `log_dir` set, output goes to a file in that directory without ANSI colors.
pub fn init_logging(log_dir: Option<&Path>) -> Result<()> {
    let (writer, ansi) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| {
                    // Preserve error chain by wrapping the source error
                    DebounceError::LoggingError(Box::new(e))
                })?;
            (BoxMakeWriter::new(file_appender), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = fmt()
        .with_writer(writer)
        .with_env_filter(default_filter())
        .with_ansi(ansi)
        .with_target(true) // Include target module
        .with_thread_ids(true) // Commits may run on the timer thread
        .with_file(true) // Include file names
        .with_line_number(true) // Include line numbers
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| DebounceError::LoggingError(Box::new(e)))?;

    tracing::info!("debounced-input v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Filter from `RUST_LOG`, or `info` when unset or invalid
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;

    #[test]
    fn test_default_filter_builds() {
        let filter = default_filter();
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_second_init_reports_logging_error() {
        let dir = create_test_dir();
        // Whichever call installs the global subscriber first, the other must fail cleanly
        let first = init_logging(Some(dir.path()));
        let second = init_logging(None);
        assert!(first.is_ok() || matches!(first, Err(DebounceError::LoggingError(_))));
        assert!(matches!(second, Err(DebounceError::LoggingError(_))));
    }
}
