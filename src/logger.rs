//! Debug logging support for ccsed
//!
//! When debug mode is enabled (config `logging.debug` or `--debug`),
//! events are appended to ~/.ccsed/ccsed.log. Standard output stays
//! reserved for transformed text.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "CCSED_LOG";

const DEFAULT_FILTER: &str = "ccsed=debug";

/// Initialize the debug logging system
///
/// Returns the path to the log file, or None if logging is not enabled.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    let log_path = log_file_path()?;
    init_file_logging(&log_path)
}

/// Install a subscriber writing to `log_path`
pub fn init_file_logging(log_path: &Path) -> Result<Option<PathBuf>> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path);

    match file {
        Ok(log_file) => {
            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter());

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            Ok(Some(log_path.to_path_buf()))
        }
        Err(e) => {
            // Logging is optional; editing must still work
            eprintln!("Warning: Could not open log file {}: {}", log_path.display(), e);
            Ok(None)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Get the log file path
pub fn log_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".ccsed").join("ccsed.log"))
}
