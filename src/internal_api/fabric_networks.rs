//! Fabric Network Operations for Internal API
//!
//! CRUD over the fabric networks of one VLAN. Writes enforce the resolver cap;
//! deletion goes through the default-network guard first.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{
    project_fields, FabricNetworkCreate, FabricNetworkUpdate, NetworkView, ResourceKind,
    Resolvers, TenantContext,
};
use crate::internal_api::error::InternalError;
use crate::internal_api::guard::guard_delete;
use crate::internal_api::services::NetworkServices;
use crate::internal_api::translate::translate_network;
use crate::internal_api::types::{from_params, FabricNetworkKey, VlanKey, MAX_RESOLVERS};
use crate::validation::{Params, SchemaId};

/// Reject payloads carrying more resolvers than a network supports
fn check_resolvers(payload: &impl Resolvers) -> Result<(), InternalError> {
    if payload.resolvers().len() > MAX_RESOLVERS {
        return Err(InternalError::invalid_property(
            "resolvers",
            format!("maximum of {} resolvers", MAX_RESOLVERS),
        ));
    }
    Ok(())
}

/// Fabric network operations for the internal API layer
pub struct FabricNetworkOperations {
    services: Arc<NetworkServices>,
}

impl FabricNetworkOperations {
    pub fn new(services: Arc<NetworkServices>) -> Self {
        Self { services }
    }

    fn fields() -> &'static [&'static str] {
        project_fields(ResourceKind::FabricNetwork)
    }

    /// List the fabric networks on a VLAN
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn list(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<Vec<NetworkView>, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::ListFabricNetworks, params)?;
        let key: VlanKey = from_params(&params)?;

        let networks =
            self.services.backend.list_fabric_networks(ctx, key.vlan_id, Self::fields()).await?;

        let tag = self.services.external_nic_tag();
        Ok(networks.iter().map(|n| translate_network(n, tag)).collect())
    }

    /// Create a fabric network on a VLAN
    ///
    /// # Errors
    /// * `InvalidArgument` for schema violations or more than four resolvers
    /// * whatever the backend reports, translated
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn create(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<NetworkView, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::CreateFabricNetwork, params)?;
        let key: VlanKey = from_params(&params)?;
        let network: FabricNetworkCreate = from_params(&params)?;
        check_resolvers(&network)?;

        let created = self
            .services
            .backend
            .create_fabric_network(ctx, key.vlan_id, &network, Self::fields())
            .await?;

        info!(vlan_id = key.vlan_id, network_id = %created.uuid, "Fabric network created");
        Ok(translate_network(&created, self.services.external_nic_tag()))
    }

    /// Get a fabric network
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn get(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<NetworkView, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::GetFabricNetwork, params)?;
        let key: FabricNetworkKey = from_params(&params)?;

        let network = self
            .services
            .backend
            .get_fabric_network(ctx, key.vlan_id, &key.id, Self::fields())
            .await?;

        Ok(translate_network(&network, self.services.external_nic_tag()))
    }

    /// Update a fabric network
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn update(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<NetworkView, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::UpdateFabricNetwork, params)?;
        let key: FabricNetworkKey = from_params(&params)?;
        let changes: FabricNetworkUpdate = from_params(&params)?;
        check_resolvers(&changes)?;

        let updated = self
            .services
            .backend
            .update_fabric_network(ctx, key.vlan_id, &key.id, &changes, Self::fields())
            .await?;

        info!(vlan_id = key.vlan_id, network_id = %key.id, "Fabric network updated");
        Ok(translate_network(&updated, self.services.external_nic_tag()))
    }

    /// Delete a fabric network unless it is the tenant's default
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn delete(&self, ctx: &TenantContext, params: Params) -> Result<(), InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::DeleteFabricNetwork, params)?;
        let key: FabricNetworkKey = from_params(&params)?;

        guard_delete(self.services.directory.as_ref(), ctx, self.services.datacenter(), &key.id)
            .await?;

        self.services.backend.delete_fabric_network(ctx, key.vlan_id, &key.id).await?;

        info!(vlan_id = key.vlan_id, network_id = %key.id, "Fabric network deleted");
        Ok(())
    }
}
