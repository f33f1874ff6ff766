//! Logging setup
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init`] once with the configured [`LogConfig`].

use crate::config::LogConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `config`
///
/// `RUST_LOG`, when set, overrides the configured filter.
///
/// # Errors
/// - `Filter` if the filter directive does not parse
/// - `AlreadyInstalled` if a global subscriber is already set
pub fn init(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| TelemetryError::Filter(config.filter.clone(), e.to_string()))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))
}

/// Logging setup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TelemetryError {
    /// Filter directive is invalid
    #[error("invalid log filter {0:?}: {1}")]
    Filter(String, String),

    /// A global subscriber was installed earlier
    #[error("subscriber already installed: {0}")]
    AlreadyInstalled(String),
}
