//! HTTP client for the directory service's per-datacenter account config.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::error::BackendResult;
use super::napi::{check_status, http_client, read_json};
use super::DefaultNetworkDirectory;
use crate::config::BackendConfig;
use crate::domain::Account;
use crate::errors::Result;
use crate::REQUEST_ID_HEADER;

/// Datacenter-local account configuration
#[derive(Debug, Default, Deserialize)]
struct DatacenterLocalConfig {
    #[serde(default)]
    defaultnetwork: Option<String>,
}

/// Directory service client
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Self::with_base_url(&config.directory_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DefaultNetworkDirectory for DirectoryClient {
    async fn default_network(
        &self,
        account: &Account,
        datacenter: &str,
        request_id: &str,
    ) -> BackendResult<Option<String>> {
        let url =
            format!("{}/accounts/{}/dclocalconfig/{}", self.base_url, account.uuid, datacenter);
        debug!("GET {}", url);

        let response =
            self.client.get(&url).header(REQUEST_ID_HEADER, request_id).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let config: DatacenterLocalConfig = read_json(check_status(response).await?).await?;
        Ok(config.defaultnetwork.filter(|id| !id.is_empty()))
    }
}
