//! Configuration loading and discovery for `osk.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{LogLevel, OskConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "osk.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse osk.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override stack capacity
    pub capacity: Option<usize>,
    /// Override starting palette
    pub start: Option<String>,
    /// Override strict loading
    pub strict: Option<bool>,
    /// Override log level
    pub log_level: Option<LogLevel>,
}

/// Find osk.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find osk.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an osk.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. Without a config file, returns the
/// default configuration rooted at the current directory.
pub fn load_config(path: Option<&Path>) -> Result<OskConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<OskConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: OskConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Default configuration when no osk.toml is found.
pub fn default_config() -> OskConfig {
    OskConfig { root: env::current_dir().unwrap_or_default(), ..OskConfig::default() }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// configuration is validated again.
pub fn merge_cli_overrides(
    config: &mut OskConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(capacity) = overrides.capacity {
        config.navigation.capacity = capacity;
    }
    if let Some(ref start) = overrides.start {
        config.palettes.start = Some(start.clone());
    }
    if let Some(strict) = overrides.strict {
        config.palettes.strict = strict;
    }
    if let Some(level) = overrides.log_level {
        config.logging.level = level;
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}
