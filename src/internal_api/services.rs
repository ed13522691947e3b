//! Shared, read-only collaborators for the network operations.

use std::sync::Arc;

use crate::backend::{DefaultNetworkDirectory, NetworkBackend};
use crate::config::NetworkConfig;
use crate::internal_api::error::InternalError;
use crate::validation::{Params, SchemaId, SchemaValidator};

/// Key carrying the tenant login in merged path parameters
const ACCOUNT_PARAM: &str = "account";

/// Everything an operation needs besides its caller and parameters
#[derive(Clone)]
pub struct NetworkServices {
    pub settings: NetworkConfig,
    pub validator: SchemaValidator,
    pub backend: Arc<dyn NetworkBackend>,
    pub directory: Arc<dyn DefaultNetworkDirectory>,
}

impl NetworkServices {
    pub fn new(
        settings: NetworkConfig,
        backend: Arc<dyn NetworkBackend>,
        directory: Arc<dyn DefaultNetworkDirectory>,
    ) -> Self {
        Self { settings, validator: SchemaValidator::new(), backend, directory }
    }

    /// Fail fast when fabrics are disabled in this datacenter
    pub fn ensure_fabrics_enabled(&self) -> Result<(), InternalError> {
        if self.settings.fabrics_enabled {
            Ok(())
        } else {
            Err(InternalError::fabrics_disabled())
        }
    }

    /// Validate merged parameters, minus the tenant path segment
    pub fn validate(&self, schema: SchemaId, mut params: Params) -> Result<Params, InternalError> {
        params.remove(ACCOUNT_PARAM);
        Ok(self.validator.validate(schema, &params)?)
    }

    pub fn external_nic_tag(&self) -> &str {
        &self.settings.external_nic_tag
    }

    pub fn datacenter(&self) -> &str {
        &self.settings.datacenter
    }
}

impl std::fmt::Debug for NetworkServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkServices")
            .field("settings", &self.settings)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
