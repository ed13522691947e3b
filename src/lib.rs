//! # fabricplane
//!
//! Fabric network and VLAN management API for a multi-tenant cloud control
//! plane. Tenants create, inspect and remove VLANs and fabric networks, and
//! list the shared networks and network pools they may provision on.
//! Authoritative state lives in the network-allocation service (NAPI); this
//! crate validates requests, enforces the rules NAPI does not, and translates
//! records and errors in both directions.
//!
//! ## Architecture
//!
//! ```text
//! REST API (axum) → Internal API operations → NetworkBackend (NAPI)
//!                        ↓            ↓
//!              Schema validation   DefaultNetworkDirectory
//! ```
//!
//! ## Core Components
//!
//! - **API**: route table, tenant extraction, HTTP error mapping
//! - **Internal API**: VLAN, fabric network and network operations, the
//!   default-network guard, record translation and pool deduplication
//! - **Validation**: JSON Schema documents per operation with a compiled cache
//! - **Backend**: traits for NAPI and the directory service, with reqwest clients
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fabricplane::api::start_api_server;
//! use fabricplane::backend::{DirectoryClient, NapiClient};
//! use fabricplane::config::AppConfig;
//! use fabricplane::internal_api::NetworkServices;
//!
//! #[tokio::main]
//! async fn main() -> fabricplane::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let services = NetworkServices::new(
//!         config.network.clone(),
//!         Arc::new(NapiClient::new(&config.backend)?),
//!         Arc::new(DirectoryClient::new(&config.backend)?),
//!     );
//!     start_api_server(config.api, Arc::new(services)).await
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod domain;
pub mod errors;
pub mod internal_api;
pub mod observability;
pub mod validation;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Correlation id header, read from tenants and forwarded to every backend call
pub const REQUEST_ID_HEADER: &str = "x-request-id";
