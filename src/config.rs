//! Configuration management for termattrib
//!
//! All configuration is loaded from `./config/termattrib.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the config template.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/termattrib.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/termattrib.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("Invalid output format '{0}' (expected 'csv' or 'json')")]
    InvalidFormat(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rosters: RosterConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub output: OutputConfig,
}

/// Roster file locations
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    pub customers_file: String,
    pub terminals_file: String,
}

/// Aggregation-pass settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub include_empty_customers: bool,
    #[serde(default)]
    pub include_suspended_in_totals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_empty_customers: true,
            include_suspended_in_totals: false,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub filename: String,
    /// Output directory; when unset the CLI falls back to the Desktop.
    #[serde(default)]
    pub dir: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rosters.customers_file.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "rosters.customers_file".to_string(),
            });
        }
        if self.rosters.terminals_file.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "rosters.terminals_file".to_string(),
            });
        }
        if self.output.filename.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.filename".to_string(),
            });
        }
        match self.output.format.as_str() {
            "csv" | "json" => Ok(()),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }

    /// Write the default configuration template to the default path.
    /// Fails if the file already exists.
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = PathBuf::from(CONFIG_PATH);
        if path.exists() {
            return Err(ConfigError::IoError(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Configuration file already exists at {}", path.display()),
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_CONFIG)?;
        Ok(path)
    }
}
