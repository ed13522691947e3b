//! Default-network deletion guard.

use tracing::{info, instrument};

use crate::backend::DefaultNetworkDirectory;
use crate::domain::TenantContext;
use crate::internal_api::error::InternalError;
use crate::observability::metrics::record_default_network_rejection;

pub const NO_DEFAULT_NETWORK: &str = "unable to determine default network";
pub const DEFAULT_NETWORK_DELETE: &str = "cannot delete the default network";

/// Refuse to delete the tenant's default network in `datacenter`.
///
/// A tenant without a resolvable default is a backend consistency fault and
/// reported as `Internal`, as is a directory lookup that fails outright.
#[instrument(skip(directory, ctx), fields(account = %ctx.account.login, network_id = %network_id))]
pub async fn guard_delete(
    directory: &dyn DefaultNetworkDirectory,
    ctx: &TenantContext,
    datacenter: &str,
    network_id: &str,
) -> Result<(), InternalError> {
    let default_network = directory
        .default_network(&ctx.account, datacenter, &ctx.request_id)
        .await
        .map_err(|e| InternalError::internal(NO_DEFAULT_NETWORK).with_cause(e))?
        .ok_or_else(|| InternalError::internal(NO_DEFAULT_NETWORK))?;

    if default_network == network_id {
        record_default_network_rejection();
        info!(datacenter = %datacenter, "Refused deletion of default network");
        return Err(InternalError::invalid_argument(DEFAULT_NETWORK_DELETE));
    }

    Ok(())
}
