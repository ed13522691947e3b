//! Tenant identity attached to every request by the dispatcher.

use serde::{Deserialize, Serialize};

/// Authenticated account on whose behalf a request runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Directory-service identifier, used as the backend owner id
    pub uuid: String,
    /// Login name, as it appears in request paths
    pub login: String,
}

/// Everything an operation knows about its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub account: Account,
    /// Correlation id forwarded to every backend call
    pub request_id: String,
}

impl TenantContext {
    pub fn new(
        uuid: impl Into<String>,
        login: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            account: Account { uuid: uuid.into(), login: login.into() },
            request_id: request_id.into(),
        }
    }

    /// Backend owner id for this tenant
    pub fn owner_uuid(&self) -> &str {
        &self.account.uuid
    }
}
