//! Configuration management for ccsed
//!
//! ccsed reads optional configuration from ~/.ccsed/config.toml.
//! A missing file means defaults; command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How substitution flags influence execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FlagSemantics {
    /// Flags are parsed and kept, replacement is always global and case-sensitive
    #[default]
    Reference,
    /// Flags change execution: first-match vs global, case folding, delete, print
    Sed,
}

/// ccsed configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processing: ProcessingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default)]
    pub flag_semantics: FlagSemantics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to ~/.ccsed/ccsed.log
    #[serde(default)]
    pub debug: bool,
}

/// Get the default configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    Ok(home_dir.join(".ccsed").join("config.toml"))
}

/// Load configuration from the default location
pub fn load_config() -> Result<Config> {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        // No home directory: nothing to read
        Err(_) => Ok(Config::default()),
    }
}

/// Load configuration from a specific file
///
/// A missing file yields defaults. A malformed file is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}
