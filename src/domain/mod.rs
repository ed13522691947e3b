//! # Domain Types
//!
//! Tenant context, backend records and their tenant-facing counterparts,
//! write payloads, and the per-resource field allow-lists.

pub mod fields;
pub mod network;
pub mod requests;
pub mod tenant;

pub use fields::{project_fields, projection_query, ResourceKind};
pub use network::{BackendNetwork, FabricVlan, NetworkView};
pub use requests::{FabricNetworkCreate, FabricNetworkUpdate, Resolvers, VlanCreate, VlanUpdate};
pub use tenant::{Account, TenantContext};
