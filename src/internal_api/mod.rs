//! Internal API Layer
//!
//! The network operations proper, between the HTTP handlers and the backend
//! services. This layer centralizes:
//! - The fabrics feature gate
//! - Schema validation and parameter normalization
//! - Business rules (resolver cap, default-network guard)
//! - Translation of backend records and errors
//!
//! Operations take the caller's [`TenantContext`](crate::domain::TenantContext)
//! and the merged parameter map; they hold no per-request state.

pub mod error;
pub mod fabric_networks;
pub mod guard;
pub mod networks;
pub mod services;
pub mod translate;
pub mod types;
pub mod vlans;

#[cfg(test)]
mod tests;

pub use error::{ErrorCause, InternalError};
pub use fabric_networks::FabricNetworkOperations;
pub use guard::guard_delete;
pub use networks::NetworkOperations;
pub use services::NetworkServices;
pub use translate::{dedupe, translate_network, translate_vlan};
pub use types::*;
pub use vlans::VlanOperations;
