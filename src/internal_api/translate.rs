//! Backend record to tenant record translation, and listing deduplication.

use std::collections::HashSet;

use crate::domain::{BackendNetwork, FabricVlan, NetworkView};

/// Translate a backend network or pool into its tenant-facing shape.
///
/// `public` takes the backend's explicit flag when present, otherwise fabric
/// networks are private, otherwise a network is public iff its NIC tag is the
/// external tag. Fabric records additionally carry every allow-listed field the
/// backend returned.
pub fn translate_network(record: &BackendNetwork, external_nic_tag: &str) -> NetworkView {
    let public = record.public.unwrap_or_else(|| {
        !record.is_fabric() && record.nic_tag.as_deref() == Some(external_nic_tag)
    });

    let mut view = NetworkView {
        id: record.uuid.clone(),
        name: record.name.clone(),
        public,
        description: record.description.clone().filter(|d| !d.is_empty()),
        ..Default::default()
    };

    if record.is_fabric() {
        view.description = record.description.clone();
        view.fabric = record.fabric;
        view.gateway = record.gateway.clone();
        view.internet_nat = record.internet_nat;
        view.provision_start_ip = record.provision_start_ip.clone();
        view.provision_end_ip = record.provision_end_ip.clone();
        view.resolvers = record.resolvers.clone();
        view.routes = record.routes.clone();
        view.subnet = record.subnet.clone();
        view.vlan_id = record.vlan_id;
    }

    view
}

pub fn translate_vlan(vlan: FabricVlan) -> FabricVlan {
    vlan.for_tenant()
}

/// Drop plain networks already represented by a visible pool.
///
/// With `fabric_only`, records without the fabric flag are removed first, so
/// their pool memberships do not hide anything. Order is preserved.
pub fn dedupe(records: Vec<BackendNetwork>, fabric_only: bool) -> Vec<BackendNetwork> {
    let records: Vec<BackendNetwork> =
        records.into_iter().filter(|r| !fabric_only || r.is_fabric()).collect();

    let pooled: HashSet<String> =
        records.iter().flat_map(|r| r.pool_members().iter().cloned()).collect();

    records.into_iter().filter(|r| r.is_pool() || !pooled.contains(&r.uuid)).collect()
}
