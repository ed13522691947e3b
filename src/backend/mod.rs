//! # Backend Collaborators
//!
//! Traits for the two services this crate depends on, plus their HTTP
//! implementations:
//!
//! - [`NetworkBackend`]: the network-allocation service (NAPI), owner of VLANs,
//!   fabric networks, shared networks and network pools.
//! - [`DefaultNetworkDirectory`]: the directory service holding each tenant's
//!   per-datacenter default network.
//!
//! Operations depend only on the traits, so tests substitute in-memory fakes.

pub mod directory;
pub mod error;
pub mod napi;

pub use directory::DirectoryClient;
pub use error::{BackendError, BackendResult, FieldError};
pub use napi::NapiClient;

use async_trait::async_trait;

use crate::domain::{
    Account, BackendNetwork, FabricNetworkCreate, FabricNetworkUpdate, FabricVlan, TenantContext,
    VlanCreate, VlanUpdate,
};

/// Network-allocation service.
///
/// Every call is scoped to the tenant in `ctx` and forwards its correlation id.
/// `fields` is the projection requested from the backend; it never widens what
/// the backend would return.
#[async_trait]
pub trait NetworkBackend: Send + Sync {
    async fn list_fabric_vlans(
        &self,
        ctx: &TenantContext,
        fields: &[&str],
    ) -> BackendResult<Vec<FabricVlan>>;

    async fn create_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan: &VlanCreate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan>;

    async fn get_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<FabricVlan>;

    async fn update_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        changes: &VlanUpdate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan>;

    async fn delete_fabric_vlan(&self, ctx: &TenantContext, vlan_id: u16) -> BackendResult<()>;

    async fn list_fabric_networks(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<Vec<BackendNetwork>>;

    async fn create_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network: &FabricNetworkCreate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork>;

    async fn get_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork>;

    async fn update_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        changes: &FabricNetworkUpdate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork>;

    async fn delete_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
    ) -> BackendResult<()>;

    /// Networks the tenant may provision on, fabric and shared alike
    async fn list_networks(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>>;

    async fn get_network(&self, ctx: &TenantContext, network_id: &str)
        -> BackendResult<BackendNetwork>;

    async fn list_network_pools(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>>;

    async fn get_network_pool(
        &self,
        ctx: &TenantContext,
        pool_id: &str,
    ) -> BackendResult<BackendNetwork>;
}

/// Directory-service lookup of a tenant's default network.
#[async_trait]
pub trait DefaultNetworkDirectory: Send + Sync {
    /// The default network for `account` in `datacenter`, or `None` when the
    /// tenant has no designation there.
    async fn default_network(
        &self,
        account: &Account,
        datacenter: &str,
        request_id: &str,
    ) -> BackendResult<Option<String>>;
}
