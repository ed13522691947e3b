//! Fabric VLAN Operations for Internal API
//!
//! CRUD over the tenant's fabric VLANs. Every operation checks the fabrics
//! feature gate before looking at its parameters.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{project_fields, FabricVlan, ResourceKind, TenantContext, VlanCreate, VlanUpdate};
use crate::internal_api::error::InternalError;
use crate::internal_api::services::NetworkServices;
use crate::internal_api::translate::translate_vlan;
use crate::internal_api::types::{from_params, VlanKey};
use crate::validation::{Params, SchemaId};

/// VLAN operations for the internal API layer
pub struct VlanOperations {
    services: Arc<NetworkServices>,
}

impl VlanOperations {
    pub fn new(services: Arc<NetworkServices>) -> Self {
        Self { services }
    }

    fn fields() -> &'static [&'static str] {
        project_fields(ResourceKind::Vlan)
    }

    /// List the tenant's VLANs
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn list(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<Vec<FabricVlan>, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        self.services.validate(SchemaId::ListFabricVlans, params)?;

        let vlans = self.services.backend.list_fabric_vlans(ctx, Self::fields()).await?;
        Ok(vlans.into_iter().map(translate_vlan).collect())
    }

    /// Create a VLAN
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn create(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<FabricVlan, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::CreateFabricVlan, params)?;
        let vlan: VlanCreate = from_params(&params)?;

        let created = self.services.backend.create_fabric_vlan(ctx, &vlan, Self::fields()).await?;

        info!(vlan_id = created.vlan_id, "Fabric VLAN created");
        Ok(translate_vlan(created))
    }

    /// Get a VLAN by id
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn get(&self, ctx: &TenantContext, params: Params) -> Result<FabricVlan, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::GetFabricVlan, params)?;
        let key: VlanKey = from_params(&params)?;

        let vlan = self.services.backend.get_fabric_vlan(ctx, key.vlan_id, Self::fields()).await?;
        Ok(translate_vlan(vlan))
    }

    /// Rename or re-describe a VLAN
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn update(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<FabricVlan, InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::UpdateFabricVlan, params)?;
        let key: VlanKey = from_params(&params)?;
        let changes: VlanUpdate = from_params(&params)?;

        let updated = self
            .services
            .backend
            .update_fabric_vlan(ctx, key.vlan_id, &changes, Self::fields())
            .await?;

        info!(vlan_id = key.vlan_id, "Fabric VLAN updated");
        Ok(translate_vlan(updated))
    }

    /// Delete a VLAN
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn delete(&self, ctx: &TenantContext, params: Params) -> Result<(), InternalError> {
        self.services.ensure_fabrics_enabled()?;
        let params = self.services.validate(SchemaId::DeleteFabricVlan, params)?;
        let key: VlanKey = from_params(&params)?;

        self.services.backend.delete_fabric_vlan(ctx, key.vlan_id).await?;

        info!(vlan_id = key.vlan_id, "Fabric VLAN deleted");
        Ok(())
    }
}
