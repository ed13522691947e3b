//! Tenant context extraction.
//!
//! The authenticating gateway in front of this service resolves the caller and
//! forwards the account uuid in `x-account-uuid`. The login comes from the
//! `{account}` path segment; the correlation id from `x-request-id`, which the
//! router guarantees is present.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::api::error::ApiError;
use crate::domain::TenantContext;
use crate::REQUEST_ID_HEADER;

pub const ACCOUNT_UUID_HEADER: &str = "x-account-uuid";

/// Extractor for the caller's [`TenantContext`]
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let account_uuid = header(&parts.headers, ACCOUNT_UUID_HEADER)
            .ok_or_else(|| ApiError::unauthorized("missing tenant account"))?
            .to_string();

        let request_id = header(&parts.headers, REQUEST_ID_HEADER)
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let login = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(params)| params.get("account").cloned())
            .unwrap_or_default();

        Ok(Tenant(TenantContext::new(account_uuid, login, request_id)))
    }
}
