//! Operation tests for the internal API layer
//!
//! The operations run against in-memory fakes of both backend traits that
//! record every call, so tests can assert what reached the backend as well as
//! what came back.


use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::{BackendError, BackendResult, DefaultNetworkDirectory, NetworkBackend};
use crate::config::NetworkConfig;
use crate::domain::{
    Account, BackendNetwork, FabricNetworkCreate, FabricNetworkUpdate, FabricVlan, TenantContext,
    VlanCreate, VlanUpdate,
};
use crate::internal_api::NetworkServices;
use crate::validation::Params;

pub const OWNER: &str = "930896af-bf8c-48d4-885c-6573a94b1853";
pub const REQUEST_ID: &str = "5a1c7e0e-3f7e-4d52-9d3b-0c1f7d6f0001";
pub const DEFAULT_NETWORK: &str = "11111111-2222-4333-8444-555555555555";

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub owner: String,
    pub request_id: String,
    pub fields: Vec<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    pub vlans: Mutex<Vec<FabricVlan>>,
    pub fabric_networks: Mutex<Vec<BackendNetwork>>,
    pub networks: Mutex<Vec<BackendNetwork>>,
    pub pools: Mutex<Vec<BackendNetwork>>,
    pub calls: Mutex<Vec<Call>>,
    /// Returned by every call while set
    pub failure: Mutex<Option<BackendError>>,
}

impl FakeBackend {
    pub fn fail_with(&self, error: BackendError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.op).collect()
    }

    fn record(&self, op: &'static str, ctx: &TenantContext, fields: &[&str]) -> BackendResult<()> {
        self.calls.lock().unwrap().push(Call {
            op,
            owner: ctx.owner_uuid().to_string(),
            request_id: ctx.request_id.clone(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find_fabric_network(&self, vlan_id: u16, id: &str) -> BackendResult<BackendNetwork> {
        self.fabric_networks
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.uuid == id && n.vlan_id == Some(vlan_id))
            .cloned()
            .ok_or_else(|| BackendError::not_found("network not found"))
    }
}

#[async_trait]
impl NetworkBackend for FakeBackend {
    async fn list_fabric_vlans(
        &self,
        ctx: &TenantContext,
        fields: &[&str],
    ) -> BackendResult<Vec<FabricVlan>> {
        self.record("list_fabric_vlans", ctx, fields)?;
        Ok(self.vlans.lock().unwrap().clone())
    }

    async fn create_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan: &VlanCreate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        self.record("create_fabric_vlan", ctx, fields)?;
        let created = FabricVlan {
            vlan_id: vlan.vlan_id,
            name: vlan.name.clone(),
            description: vlan.description.clone(),
        };
        self.vlans.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        self.record("get_fabric_vlan", ctx, fields)?;
        self.vlans
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.vlan_id == vlan_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("vlan not found"))
    }

    async fn update_fabric_vlan(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        changes: &VlanUpdate,
        fields: &[&str],
    ) -> BackendResult<FabricVlan> {
        self.record("update_fabric_vlan", ctx, fields)?;
        let mut vlans = self.vlans.lock().unwrap();
        let vlan = vlans
            .iter_mut()
            .find(|v| v.vlan_id == vlan_id)
            .ok_or_else(|| BackendError::not_found("vlan not found"))?;
        if let Some(name) = &changes.name {
            vlan.name = name.clone();
        }
        if let Some(description) = &changes.description {
            vlan.description = Some(description.clone());
        }
        Ok(vlan.clone())
    }

    async fn delete_fabric_vlan(&self, ctx: &TenantContext, vlan_id: u16) -> BackendResult<()> {
        self.record("delete_fabric_vlan", ctx, &[])?;
        let mut vlans = self.vlans.lock().unwrap();
        let before = vlans.len();
        vlans.retain(|v| v.vlan_id != vlan_id);
        if vlans.len() == before {
            return Err(BackendError::not_found("vlan not found"));
        }
        Ok(())
    }

    async fn list_fabric_networks(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        fields: &[&str],
    ) -> BackendResult<Vec<BackendNetwork>> {
        self.record("list_fabric_networks", ctx, fields)?;
        Ok(self
            .fabric_networks
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.vlan_id == Some(vlan_id))
            .cloned()
            .collect())
    }

    async fn create_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network: &FabricNetworkCreate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        self.record("create_fabric_network", ctx, fields)?;
        let created = BackendNetwork {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: network.name.clone(),
            description: network.description.clone(),
            nic_tag: Some("sdc_overlay".into()),
            fabric: Some(true),
            gateway: network.gateway.clone(),
            internet_nat: Some(network.internet_nat.unwrap_or(true)),
            provision_start_ip: Some(network.provision_start_ip.clone()),
            provision_end_ip: Some(network.provision_end_ip.clone()),
            resolvers: network.resolvers.clone(),
            routes: network.routes.clone(),
            subnet: Some(network.subnet.clone()),
            vlan_id: Some(vlan_id),
            ..Default::default()
        };
        self.fabric_networks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        self.record("get_fabric_network", ctx, fields)?;
        self.find_fabric_network(vlan_id, network_id)
    }

    async fn update_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
        changes: &FabricNetworkUpdate,
        fields: &[&str],
    ) -> BackendResult<BackendNetwork> {
        self.record("update_fabric_network", ctx, fields)?;
        let mut networks = self.fabric_networks.lock().unwrap();
        let network = networks
            .iter_mut()
            .find(|n| n.uuid == network_id && n.vlan_id == Some(vlan_id))
            .ok_or_else(|| BackendError::not_found("network not found"))?;
        if let Some(name) = &changes.name {
            network.name = name.clone();
        }
        if changes.description.is_some() {
            network.description = changes.description.clone();
        }
        if changes.gateway.is_some() {
            network.gateway = changes.gateway.clone();
        }
        if changes.resolvers.is_some() {
            network.resolvers = changes.resolvers.clone();
        }
        if changes.routes.is_some() {
            network.routes = changes.routes.clone();
        }
        Ok(network.clone())
    }

    async fn delete_fabric_network(
        &self,
        ctx: &TenantContext,
        vlan_id: u16,
        network_id: &str,
    ) -> BackendResult<()> {
        self.record("delete_fabric_network", ctx, &[])?;
        self.find_fabric_network(vlan_id, network_id)?;
        self.fabric_networks.lock().unwrap().retain(|n| n.uuid != network_id);
        Ok(())
    }

    async fn list_networks(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>> {
        self.record("list_networks", ctx, &[])?;
        Ok(self.networks.lock().unwrap().clone())
    }

    async fn get_network(
        &self,
        ctx: &TenantContext,
        network_id: &str,
    ) -> BackendResult<BackendNetwork> {
        self.record("get_network", ctx, &[])?;
        self.networks
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.uuid == network_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("network not found"))
    }

    async fn list_network_pools(&self, ctx: &TenantContext) -> BackendResult<Vec<BackendNetwork>> {
        self.record("list_network_pools", ctx, &[])?;
        Ok(self.pools.lock().unwrap().clone())
    }

    async fn get_network_pool(
        &self,
        ctx: &TenantContext,
        pool_id: &str,
    ) -> BackendResult<BackendNetwork> {
        self.record("get_network_pool", ctx, &[])?;
        self.pools
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.uuid == pool_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("network pool not found"))
    }
}

pub struct FakeDirectory {
    pub default_network: Mutex<Option<String>>,
    pub failure: Mutex<Option<BackendError>>,
    pub lookups: Mutex<Vec<(String, String)>>,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self {
            default_network: Mutex::new(Some(DEFAULT_NETWORK.to_string())),
            failure: Mutex::new(None),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DefaultNetworkDirectory for FakeDirectory {
    async fn default_network(
        &self,
        account: &Account,
        datacenter: &str,
        _request_id: &str,
    ) -> BackendResult<Option<String>> {
        self.lookups.lock().unwrap().push((account.uuid.clone(), datacenter.to_string()));
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.default_network.lock().unwrap().clone())
    }
}

pub struct Harness {
    pub services: Arc<NetworkServices>,
    pub backend: Arc<FakeBackend>,
    pub directory: Arc<FakeDirectory>,
}

pub fn harness(fabrics_enabled: bool) -> Harness {
    let backend = Arc::new(FakeBackend::default());
    let directory = Arc::new(FakeDirectory::default());
    let settings = NetworkConfig {
        datacenter: "us-east-1".into(),
        fabrics_enabled,
        external_nic_tag: "external".into(),
    };
    let services = Arc::new(NetworkServices::new(settings, backend.clone(), directory.clone()));
    Harness { services, backend, directory }
}

pub fn ctx() -> TenantContext {
    TenantContext::new(OWNER, "alice", REQUEST_ID)
}

pub fn params(value: Value) -> Params {
    value.as_object().cloned().expect("params must be a JSON object")
}

pub fn fabric_network(uuid: &str, vlan_id: u16) -> BackendNetwork {
    BackendNetwork {
        uuid: uuid.into(),
        name: format!("fabric-{}", vlan_id),
        nic_tag: Some("sdc_overlay".into()),
        fabric: Some(true),
        subnet: Some("192.168.128.0/22".into()),
        provision_start_ip: Some("192.168.128.5".into()),
        provision_end_ip: Some("192.168.131.250".into()),
        gateway: Some("192.168.128.1".into()),
        internet_nat: Some(true),
        resolvers: Some(vec!["8.8.8.8".into()]),
        vlan_id: Some(vlan_id),
        ..Default::default()
    }
}
