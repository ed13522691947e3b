//! HTTP client for the network-allocation service (NAPI).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::error::{BackendError, BackendResult};
use super::NetworkBackend;
use crate::config::BackendConfig;
use crate::domain::{
    BackendNetwork, FabricNetworkCreate, FabricNetworkUpdate, FabricVlan, TenantContext,
    VlanCreate, VlanUpdate,
};
use crate::errors::{Error, Result};
use crate::REQUEST_ID_HEADER;

/// Build the shared reqwest client used by both backend clients
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
        .build()
        .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success response to a [`BackendError`], keeping its body
pub(crate) async fn check_status(response: Response) -> BackendResult<Response> {
    let status = response.status();
    debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    trace!("Error response:\n{}", body);
    Err(BackendError::from_response(status.as_u16(), &body))
}

/// Deserialize a success body; a body that does not decode is a transport failure
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let body = response.text().await?;
    trace!("Response body:\n{}", body);

    serde_json::from_str(&body)
        .map_err(|e| BackendError::transport(format!("Failed to deserialize response: {}", e)))
}

/// NAPI client
#[derive(Debug, Clone)]
pub struct NapiClient {
    client: Client,
    base_url: String,
}

impl NapiClient {
    /// Create a client from the backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Self::with_base_url(&config.napi_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, ctx: &TenantContext) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        self.client.request(method, &url).header(REQUEST_ID_HEADER, &ctx.request_id)
    }

    fn projected(
        &self,
        method: Method,
        path: &str,
        ctx: &TenantContext,
        fields: &[&str],
    ) -> RequestBuilder {
        let request = self.request(method, path, ctx);
        if fields.is_empty() {
            request
        } else {
            request.query(&[("fields", fields.join(","))])
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> BackendResult<T> {
        let response = check_status(request.send().await?).await?;
        read_json(response).await
    }

    async fn send_no_content(request: RequestBuilder) -> BackendResult<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }

    fn vlans_path(ctx: &TenantContext) -> String {
        format!("/fabrics/{}/vlans", ctx.owner_uuid())
    }

    fn vlan_path(ctx: &TenantContext, vlan_id: u16) -> String {
        format!("{}/{}", Self::vlans_path(ctx), vlan_id)
    }

    fn fabric_networks_path(ctx: &TenantContext, vlan_id: u16) -> String {
        format!("{}/networks", Self::vlan_path(ctx, vlan_id))
    }

    fn fabric_network_path(ctx: &TenantContext, vlan_id: u16, network_id: &str) -> String {
        format!("{}/{}", Self::fabric_networks_path(ctx, vlan_id), network_id)
    }
}

#[async_trait]
impl NetworkBackend for NapiClient {
    async fn list_fabric_vlans(
        &self,
        ctx: &TenantContext,
        fields: &[&str],
    ) -> BackendResult<Vec<FabricVlan>> {
        Self::send_json(self.projected(Method::GET, &Self::vlans_path(ctx), ctx, fields)).await
    }

    async fn create_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan: &VlanCreate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        let request = self.projected(Method::POST, &Self::vlans_path(ctx), ctx, fields).json(vlan);
        Self::send_json(request).await
    }

    async fn get_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        Self::send_json(self.projected(Method::GET, &Self::vlan_path(ctx, vlan_id), ctx, fields))
            .await
    }

    async fn update_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        changes: &VlanUpdate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        let request = self
            .projected(Method::PUT, &Self::vlan_path(ctx, vlan_id), ctx, fields)
            .json(changes);
        Self::send_json(request).await
    }

    async fn delete_fabric_vlan(&self, ctx: &TenantContext, vlan_id: u16) -> BackendResult<()> {
        Self::send_no_content(self.request(Method::DELETE, &Self::vlan_path(ctx, vlan_id), ctx))
            .await
    }

    async fn list_fabric_networks(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<Vec<BackendNetwork>> {
        let path = Self::fabric_networks_path(ctx, vlan_id);
        Self::send_json(self.projected(Method::GET, &path, ctx, fields)).await
    }

    async fn create_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network: &FabricNetworkCreate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        let path = Self::fabric_networks_path(ctx, vlan_id);
        Self::send_json(self.projected(Method::POST, &path, ctx, fields).json(network)).await
    }

    async fn get_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        let path = Self::fabric_network_path(ctx, vlan_id, network_id);
        Self::send_json(self.projected(Method::GET, &path, ctx, fields)).await
    }

    async fn update_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        changes: &FabricNetworkUpdate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        let path = Self::fabric_network_path(ctx, vlan_id, network_id);
        Self::send_json(self.projected(Method::PUT, &path, ctx, fields).json(changes)).await
    }

    async fn delete_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
    ) -> BackendResult<()> {
        let path = Self::fabric_network_path(ctx, vlan_id, network_id);
        Self::send_no_content(self.request(Method::DELETE, &path, ctx)).await
    }

    async fn list_networks(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>> {
        let request = self
            .request(Method::GET, "/networks", ctx)
            .query(&[("provisionable_by", ctx.owner_uuid())]);
        Self::send_json(request).await
    }

    async fn get_network(
        &self,
        ctx: &TenantContext,
        network_id: &str,
    ) -> BackendResult<BackendNetwork> {
        let request = self
            .request(Method::GET, &format!("/networks/{}", network_id), ctx)
            .query(&[("provisionable_by", ctx.owner_uuid())]);
        Self::send_json(request).await
    }

    async fn list_network_pools(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>> {
        let request = self
            .request(Method::GET, "/network_pools", ctx)
            .query(&[("provisionable_by", ctx.owner_uuid())]);
        Self::send_json(request).await
    }

    async fn get_network_pool(
        &self,
        ctx: &TenantContext,
        pool_id: &str,
    ) -> BackendResult<BackendNetwork> {
        let request = self
            .request(Method::GET, &format!("/network_pools/{}", pool_id), ctx)
            .query(&[("provisionable_by", ctx.owner_uuid())]);
        Self::send_json(request).await
    }
}
