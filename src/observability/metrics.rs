//! # Metrics Collection
//!
//! Prometheus counters for the network operation layer. The macros are no-ops
//! until [`init_metrics`] installs the exporter.

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

const BACKEND_ERRORS: &str = "fabricplane_backend_errors_total";
const DEFAULT_NETWORK_REJECTIONS: &str = "fabricplane_default_network_delete_rejected_total";
const VALIDATION_FAILURES: &str = "fabricplane_validation_failures_total";

/// Install the Prometheus exporter if metrics are enabled
pub fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    let Some(metrics_addr) = config.metrics_bind_address() else {
        warn!("Metrics disabled: no bind address configured");
        return Ok(());
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        Error::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", crate::APP_NAME)
        .install()
        .map_err(|e| Error::observability(format!("Failed to initialize metrics exporter: {}", e)))?;

    describe_counter!(BACKEND_ERRORS, "Failed calls to the network-allocation service by status");
    describe_counter!(
        DEFAULT_NETWORK_REJECTIONS,
        "Fabric network deletions refused because the target is the default network"
    );
    describe_counter!(VALIDATION_FAILURES, "Requests rejected by schema validation");

    info!(metrics_addr = %metrics_addr, "Metrics collection initialized");
    Ok(())
}

/// Record a failed backend call; `status` is `None` for transport failures
pub fn record_backend_error(status: Option<u16>) {
    let status = status.map_or_else(|| "transport".to_string(), |s| s.to_string());
    counter!(BACKEND_ERRORS, "status" => status).increment(1);
}

/// Record a refused default-network deletion
pub fn record_default_network_rejection() {
    counter!(DEFAULT_NETWORK_REJECTIONS).increment(1);
}

/// Record a schema validation failure
pub fn record_validation_failure(schema: &'static str) {
    counter!(VALIDATION_FAILURES, "schema" => schema).increment(1);
}
