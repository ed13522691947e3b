//! # Configuration Management
//!
//! Environment-driven configuration for the fabricplane service. See
//! [`settings`] for the individual sections and their variables.

pub mod settings;

pub use settings::{
    ApiServerConfig, AppConfig, BackendConfig, NetworkConfig, ObservabilityConfig, ENV_PREFIX,
};
