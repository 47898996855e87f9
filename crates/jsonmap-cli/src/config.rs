//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments

use crate::cli::DocumentFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Directory searched when a template name is not an existing path
    pub templates_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (json, yaml)
    pub format: String,

    /// Pretty-print JSON output by default
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml_path(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.check()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".jsonmap.yaml"), PathBuf::from(".jsonmap.json")];

        if let Some(config_dir) = dirs::config_dir() {
            let jsonmap_dir = config_dir.join("jsonmap");
            paths.push(jsonmap_dir.join("config.yaml"));
            paths.push(jsonmap_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".jsonmap.yaml"));
            paths.push(home_dir.join(".jsonmap.json"));
        }

        paths
    }

    /// Reject values the CLI cannot act on
    fn check(&self) -> Result<()> {
        if DocumentFormat::from_name(&self.output.format).is_none() {
            return Err(Error::config(format!(
                "output.format must be json or yaml, got '{}'",
                self.output.format
            )));
        }
        Ok(())
    }

    /// Default output format
    pub fn output_format(&self) -> DocumentFormat {
        DocumentFormat::from_name(&self.output.format).unwrap_or(DocumentFormat::Json)
    }

    /// Serialize in the given format
    pub fn render(&self, format: DocumentFormat) -> Result<String> {
        Ok(match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
            DocumentFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = if is_yaml_path(path) {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        };
        let content = self.render(format)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Whether a path names a YAML document
pub fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}
