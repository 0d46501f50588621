//! Configuration schema types for `osk.toml`
//!
//! Defines the structure and validation rules for on-screen keyboard
//! configuration. Every section is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::navigation::DEFAULT_CAPACITY;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Navigation stack settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// Maximum number of palettes on the branch-back stack
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Where palette definitions come from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PalettesConfig {
    /// Glob patterns for definition files, relative to the config file
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// Palette displayed first
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start: Option<String>,
    /// Fail on the first bad definition instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

impl Default for PalettesConfig {
    fn default() -> Self {
        Self { sources: default_sources(), start: None, strict: false }
    }
}

fn default_sources() -> Vec<String> {
    vec!["keyboards/*.json".to_string()]
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Complete `osk.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OskConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub palettes: PalettesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory relative source patterns resolve against (the config
    /// file's directory, or the working directory without a file)
    #[serde(skip)]
    pub root: PathBuf,
}

/// A single configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "navigation.capacity")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "osk.toml: '{}' {}", self.field, self.message)
    }
}

impl OskConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.navigation.capacity == 0 {
            errors.push(ConfigValidationError {
                field: "navigation.capacity".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.palettes.sources.is_empty() {
            errors.push(ConfigValidationError {
                field: "palettes.sources".to_string(),
                message: "must contain at least one glob pattern".to_string(),
            });
        }

        if self.palettes.start.as_deref() == Some("") {
            errors.push(ConfigValidationError {
                field: "palettes.start".to_string(),
                message: "must be a non-empty palette name".to_string(),
            });
        }

        errors
    }
}
