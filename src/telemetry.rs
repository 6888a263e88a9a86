//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let json = config.json.then(|| tracing_subscriber::fmt::layer().json());
    let plain = (!config.json).then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()?;

    Ok(())
}
