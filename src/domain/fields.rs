//! Field allow-lists per resource kind.
//!
//! The same lists drive the backend `fields` projection and the translator,
//! so a field missing here is neither requested nor shown.

/// Resource kinds with a fixed output shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Vlan,
    FabricNetwork,
}

/// Fields exposed for a fabric VLAN
pub const VLAN_FIELDS: &[&str] = &["description", "name", "vlan_id"];

/// Fields exposed for a fabric network
pub const FABRIC_NETWORK_FIELDS: &[&str] = &[
    "description",
    "fabric",
    "gateway",
    "internet_nat",
    "name",
    "provision_end_ip",
    "provision_start_ip",
    "resolvers",
    "routes",
    "subnet",
    "uuid",
    "vlan_id",
];

/// Ordered allow-list for `kind`
pub fn project_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Vlan => VLAN_FIELDS,
        ResourceKind::FabricNetwork => FABRIC_NETWORK_FIELDS,
    }
}

/// Allow-list rendered as the backend's comma-separated `fields` parameter
pub fn projection_query(kind: ResourceKind) -> String {
    project_fields(kind).join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlan_projection() {
        assert_eq!(projection_query(ResourceKind::Vlan), "description,name,vlan_id");
    }

    #[test]
    fn test_fabric_network_projection_is_sorted_and_includes_uuid() {
        let fields = project_fields(ResourceKind::FabricNetwork);
        let mut sorted = fields.to_vec();
        sorted.sort_unstable();
        assert_eq!(fields, sorted.as_slice());
        assert!(fields.contains(&"uuid"));
        assert_eq!(fields.len(), 12);
    }
}
