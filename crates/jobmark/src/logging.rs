//! Logging setup.
//!
//! Library code logs through the `log` macros and opens `tracing` spans
//! around controller transitions. `init_logging` installs a
//! `tracing-subscriber` registry and bridges `log` records into it with
//! `tracing_log::LogTracer`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::ConfigError;

/// Builds the filter from `RUST_LOG` when set, else from the configured level.
fn build_env_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| ConfigError::Validation {
        message: format!("Invalid log level '{}': {}", level, e),
    })
}

/// Installs the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which makes
/// repeated calls (tests, embedding hosts) harmless.
pub fn init_logging(config: &LoggingConfig) -> Result<bool, ConfigError> {
    let filter = build_env_filter(&config.level)?;

    let layer = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(filter)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return Ok(false);
    }

    // Another logger may already own the `log` facade
    let _ = tracing_log::LogTracer::init();
    Ok(true)
}
