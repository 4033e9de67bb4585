use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::actions::ActionSetSnapshot;
use crate::error::ConfigError;
use crate::store::DEFAULT_PAD_WIDTH;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "jobmark";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Action sets used on first run, before anything has been stored.
    #[serde(default)]
    pub seed: ActionSetSnapshot,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_grace_period_ms() -> u64 {
    3000
}

fn default_pad_width() -> usize {
    DEFAULT_PAD_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            grace_period_ms: default_grace_period_ms(),
            pad_width: default_pad_width(),
            persistence: PersistenceConfig::default(),
            seed: ActionSetSnapshot::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceKind {
    #[default]
    Memory,
    Json,
    Sqlite,
}

impl std::fmt::Display for PersistenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceKind::Memory => write!(f, "memory"),
            PersistenceKind::Json => write!(f, "json"),
            PersistenceKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: PersistenceKind,
    /// Directory for file-backed stores. Defaults to the platform data
    /// directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PersistenceConfig {
    pub fn resolve_directory(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ConfigError::NoDataDirectory {
                backend: self.backend.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
