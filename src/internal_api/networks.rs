//! Network Operations for Internal API
//!
//! Read-only access to every network and pool the tenant can provision on.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::{NetworkView, TenantContext};
use crate::internal_api::error::InternalError;
use crate::internal_api::services::NetworkServices;
use crate::internal_api::translate::{dedupe, translate_network};
use crate::internal_api::types::{from_params, NetworkKey, NetworkListFilter};
use crate::validation::{Params, SchemaId};

/// Network operations for the internal API layer
pub struct NetworkOperations {
    services: Arc<NetworkServices>,
}

impl NetworkOperations {
    pub fn new(services: Arc<NetworkServices>) -> Self {
        Self { services }
    }

    /// List pools, then networks, with pooled networks folded into their pool
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn list(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<Vec<NetworkView>, InternalError> {
        let params = self.services.validate(SchemaId::ListNetworks, params)?;
        let filter: NetworkListFilter = from_params(&params)?;

        let backend = &self.services.backend;
        let (mut records, networks) =
            tokio::try_join!(backend.list_network_pools(ctx), backend.list_networks(ctx))?;
        records.extend(networks);

        let total = records.len();
        let visible = dedupe(records, filter.fabric);
        debug!(total, visible = visible.len(), fabric_only = filter.fabric, "Deduplicated networks");

        let tag = self.services.external_nic_tag();
        Ok(visible.iter().map(|n| translate_network(n, tag)).collect())
    }

    /// Get a network, or a pool with that id when no network matches
    #[instrument(skip(self, ctx, params), fields(account = %ctx.account.login, request_id = %ctx.request_id))]
    pub async fn get(
        &self,
        ctx: &TenantContext,
        params: Params,
    ) -> Result<NetworkView, InternalError> {
        let params = self.services.validate(SchemaId::GetNetwork, params)?;
        let key: NetworkKey = from_params(&params)?;

        let backend = &self.services.backend;
        let record = match backend.get_network(ctx, &key.id).await {
            Ok(network) => network,
            Err(e) if e.is_not_found() => {
                debug!(network_id = %key.id, "No network with this id, trying pools");
                backend.get_network_pool(ctx, &key.id).await?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(translate_network(&record, self.services.external_nic_tag()))
    }
}
