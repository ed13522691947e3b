//! # Structured Logging
//!
//! Subscriber setup for the tracing ecosystem. `RUST_LOG` wins over the
//! configured level when set.

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Fails if a subscriber was already installed (for example by a test harness).
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| Error::observability(format!("Invalid log level '{}': {}", config.log_level, e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logging {
        registry.with(fmt::layer().json().with_current_span(true).with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| Error::observability(format!("Failed to install subscriber: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        api_address = %config.api.socket_address(),
        datacenter = %config.network.datacenter,
        fabrics_enabled = %config.network.fabrics_enabled,
        napi_url = %config.backend.napi_url,
        directory_url = %config.backend.directory_url,
        metrics_enabled = %config.observability.enable_metrics,
        "fabricplane configuration"
    );
}
