use std::path::Path;

use crate::actions::ActionKind;
use crate::config::schema::Config;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

const SUPPORTED_VERSION: &str = "1.0";
const MAX_GRACE_PERIOD_MS: u64 = 60_000;
const MAX_PAD_WIDTH: usize = 20;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let errors: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: errors.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != SUPPORTED_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.grace_period_ms == 0 || config.grace_period_ms > MAX_GRACE_PERIOD_MS {
        return Err(ConfigError::Validation {
            message: format!(
                "grace_period_ms must be between 1 and {}, got {}",
                MAX_GRACE_PERIOD_MS, config.grace_period_ms
            ),
        });
    }

    if config.pad_width == 0 || config.pad_width > MAX_PAD_WIDTH {
        return Err(ConfigError::Validation {
            message: format!(
                "pad_width must be between 1 and {}, got {}",
                MAX_PAD_WIDTH, config.pad_width
            ),
        });
    }

    for kind in ActionKind::ALL {
        if config.seed.entries(kind).iter().any(|id| id.is_empty()) {
            return Err(ConfigError::Validation {
                message: format!("Seed for {} contains an empty identifier", kind),
            });
        }
    }

    if let Some(path) = &config.persistence.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                message: "persistence.path must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
