//! CLI configuration.
//!
//! Configuration lives in a TOML file, by default
//! `<config dir>/synapsis/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SYNAPSIS_CONFIG";

/// Loading, locating, and rendering a TOML config type.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Name used for the config directory and in hints.
    fn project_name() -> &'static str;

    /// `<config dir>/<project>/config.toml`, if the platform has a config
    /// directory.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// The explicit path if given, else the default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the config, falling back to defaults when the file is absent.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            debug!("No config directory; using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            debug!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Parses a config file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Renders the config as TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one result per line.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter used when neither `--verbose` nor `SYNAPSIS_LOG` is set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// `[names]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// Replacement for characters not allowed in entity names. May be empty.
    pub replace_char: String,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            replace_char: synapsis_core::util::ids::DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
}

/// Top-level Synapsis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynapsisConfig {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Entity name settings.
    pub names: NamesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

impl ConfigManager for SynapsisConfig {
    fn project_name() -> &'static str {
        "synapsis"
    }
}
