//! # Configuration Settings
//!
//! Defines the configuration structure for the fabricplane service.
//! Every section can be built from environment variables; the `from_lookup`
//! constructors take the variable source as a closure so tests never touch
//! the process environment.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use validator::Validate;

/// Prefix shared by every environment variable the service reads
pub const ENV_PREFIX: &str = "FABRICPLANE_";

fn lookup_string<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&format!("{}{}", ENV_PREFIX, key)).unwrap_or_else(|| default.to_string())
}

fn lookup_parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    let name = format!("{}{}", ENV_PREFIX, key);
    match lookup(&name) {
        None => default,
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!(
                variable = %name,
                value = %raw,
                default = %default,
                "Ignoring unparseable setting"
            );
            default
        }),
    }
}

fn lookup_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{}{}", ENV_PREFIX, key);
    let Some(raw) = lookup(&name) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => {
            warn!(
                variable = %name,
                value = %raw,
                default,
                "Ignoring unparseable boolean setting"
            );
            default
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// REST API server configuration
    #[validate(nested)]
    pub api: ApiServerConfig,

    /// Datacenter-wide network settings
    #[validate(nested)]
    pub network: NetworkConfig,

    /// Backend service endpoints
    #[validate(nested)]
    pub backend: BackendConfig,

    /// Logging and metrics configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load the full configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Load the full configuration from an arbitrary variable source and validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api: ApiServerConfig::from_lookup(&lookup),
            network: NetworkConfig::from_lookup(&lookup),
            backend: BackendConfig::from_lookup(&lookup),
            observability: ObservabilityConfig::from_lookup(&lookup),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    /// Checks that span sections
    fn validate_custom(&self) -> Result<()> {
        if self.observability.enable_metrics && self.observability.metrics_port == self.api.port {
            return Err(Error::config("API and metrics ports cannot be the same"));
        }

        for (name, value) in
            [("napi_url", &self.backend.napi_url), ("directory_url", &self.backend.directory_url)]
        {
            url::Url::parse(value)
                .map_err(|e| Error::config(format!("Invalid {} '{}': {}", name, value, e)))?;
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_address: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl ApiServerConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_address: lookup_string(lookup, "API_BIND_ADDRESS", &defaults.bind_address),
            port: lookup_parsed(lookup, "API_PORT", defaults.port),
        }
    }

    /// Get the server bind address
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Deployment-wide network settings, read-only after startup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NetworkConfig {
    /// Name of the datacenter this instance serves
    #[validate(length(min = 1, message = "Datacenter name cannot be empty"))]
    pub datacenter: String,

    /// Whether fabric networking is enabled in this datacenter
    pub fabrics_enabled: bool,

    /// NIC tag that marks a plain network as public
    #[validate(length(min = 1, message = "External NIC tag cannot be empty"))]
    pub external_nic_tag: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            datacenter: "coal".to_string(),
            fabrics_enabled: false,
            external_nic_tag: "external".to_string(),
        }
    }
}

impl NetworkConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            datacenter: lookup_string(lookup, "DATACENTER", &defaults.datacenter),
            fabrics_enabled: lookup_bool(lookup, "FABRICS_ENABLED", defaults.fabrics_enabled),
            external_nic_tag: lookup_string(
                lookup,
                "EXTERNAL_NIC_TAG",
                &defaults.external_nic_tag,
            ),
        }
    }
}

/// Endpoints of the network-allocation and directory services
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackendConfig {
    /// Base URL of the network-allocation service (NAPI)
    #[validate(length(min = 1, message = "NAPI url cannot be empty"))]
    pub napi_url: String,

    /// Base URL of the directory service holding default-network designations
    #[validate(length(min = 1, message = "Directory url cannot be empty"))]
    pub directory_url: String,

    /// Per-call timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            napi_url: "http://127.0.0.1:8081".to_string(),
            directory_url: "http://127.0.0.1:8082".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl BackendConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            napi_url: lookup_string(lookup, "NAPI_URL", &defaults.napi_url),
            directory_url: lookup_string(lookup, "DIRECTORY_URL", &defaults.directory_url),
            timeout_seconds: lookup_parsed(
                lookup,
                "BACKEND_TIMEOUT_SECONDS",
                defaults.timeout_seconds,
            ),
        }
    }

    /// Get the per-call timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Observability configuration for logging and metrics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when RUST_LOG is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,

    /// Enable the Prometheus metrics exporter
    pub enable_metrics: bool,

    /// Metrics server port
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
            enable_metrics: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup_string(lookup, "LOG_LEVEL", &defaults.log_level),
            json_logging: lookup_bool(lookup, "JSON_LOGGING", defaults.json_logging),
            enable_metrics: lookup_bool(lookup, "ENABLE_METRICS", defaults.enable_metrics),
            metrics_port: lookup_parsed(lookup, "METRICS_PORT", defaults.metrics_port),
        }
    }

    /// Get metrics bind address (None if disabled)
    pub fn metrics_bind_address(&self) -> Option<String> {
        if !self.enable_metrics || self.metrics_port == 0 {
            None
        } else {
            Some(format!("0.0.0.0:{}", self.metrics_port))
        }
    }
}
