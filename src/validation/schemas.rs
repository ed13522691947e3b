//! Declarative request schemas, one per operation.
//!
//! Schemas are plain JSON Schema (draft 7) documents. They never forbid
//! additional properties: path, query and body parameters arrive merged, and
//! operations pick out the fields they use.

use serde_json::{json, Value};

/// Dotted-quad IPv4 address
pub const IPV4_PATTERN: &str = r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}$";

/// IPv4 subnet in CIDR notation
pub const CIDR_PATTERN: &str = r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}/(3[0-2]|[12]?[0-9])$";

/// Route destination: a host address or a subnet
pub const ROUTE_DESTINATION_PATTERN: &str = r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}(/(3[0-2]|[12]?[0-9]))?$";

pub const UUID_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Operation schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    ListFabricVlans,
    CreateFabricVlan,
    GetFabricVlan,
    UpdateFabricVlan,
    DeleteFabricVlan,
    ListFabricNetworks,
    CreateFabricNetwork,
    GetFabricNetwork,
    UpdateFabricNetwork,
    DeleteFabricNetwork,
    ListNetworks,
    GetNetwork,
}

impl SchemaId {
    pub const ALL: [SchemaId; 12] = [
        SchemaId::ListFabricVlans,
        SchemaId::CreateFabricVlan,
        SchemaId::GetFabricVlan,
        SchemaId::UpdateFabricVlan,
        SchemaId::DeleteFabricVlan,
        SchemaId::ListFabricNetworks,
        SchemaId::CreateFabricNetwork,
        SchemaId::GetFabricNetwork,
        SchemaId::UpdateFabricNetwork,
        SchemaId::DeleteFabricNetwork,
        SchemaId::ListNetworks,
        SchemaId::GetNetwork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaId::ListFabricVlans => "ListFabricVlans",
            SchemaId::CreateFabricVlan => "CreateFabricVlan",
            SchemaId::GetFabricVlan => "GetFabricVlan",
            SchemaId::UpdateFabricVlan => "UpdateFabricVlan",
            SchemaId::DeleteFabricVlan => "DeleteFabricVlan",
            SchemaId::ListFabricNetworks => "ListFabricNetworks",
            SchemaId::CreateFabricNetwork => "CreateFabricNetwork",
            SchemaId::GetFabricNetwork => "GetFabricNetwork",
            SchemaId::UpdateFabricNetwork => "UpdateFabricNetwork",
            SchemaId::DeleteFabricNetwork => "DeleteFabricNetwork",
            SchemaId::ListNetworks => "ListNetworks",
            SchemaId::GetNetwork => "GetNetwork",
        }
    }

    /// The JSON Schema document for this operation
    pub fn document(&self) -> Value {
        match self {
            SchemaId::ListFabricVlans => object(json!({}), &[]),
            SchemaId::CreateFabricVlan => object(
                json!({
                    "vlan_id": vlan_id(),
                    "name": name(),
                    "description": description(),
                }),
                &["vlan_id", "name"],
            ),
            SchemaId::GetFabricVlan | SchemaId::DeleteFabricVlan => {
                object(json!({ "vlan_id": vlan_id() }), &["vlan_id"])
            }
            SchemaId::UpdateFabricVlan => object(
                json!({
                    "vlan_id": vlan_id(),
                    "name": name(),
                    "description": description(),
                }),
                &["vlan_id"],
            ),
            SchemaId::ListFabricNetworks => object(json!({ "vlan_id": vlan_id() }), &["vlan_id"]),
            SchemaId::CreateFabricNetwork => object(
                json!({
                    "vlan_id": vlan_id(),
                    "name": name(),
                    "description": description(),
                    "subnet": { "type": "string", "pattern": CIDR_PATTERN },
                    "provision_start_ip": ipv4(),
                    "provision_end_ip": ipv4(),
                    "gateway": ipv4(),
                    "resolvers": resolvers(),
                    "routes": routes(),
                    "internet_nat": { "type": "boolean" },
                }),
                &["vlan_id", "name", "subnet", "provision_start_ip", "provision_end_ip"],
            ),
            SchemaId::GetFabricNetwork | SchemaId::DeleteFabricNetwork => {
                object(json!({ "vlan_id": vlan_id(), "id": network_id() }), &["vlan_id", "id"])
            }
            SchemaId::UpdateFabricNetwork => object(
                json!({
                    "vlan_id": vlan_id(),
                    "id": network_id(),
                    "name": name(),
                    "description": description(),
                    "provision_start_ip": ipv4(),
                    "provision_end_ip": ipv4(),
                    "gateway": ipv4(),
                    "resolvers": resolvers(),
                    "routes": routes(),
                }),
                &["vlan_id", "id"],
            ),
            SchemaId::ListNetworks => object(json!({ "fabric": { "type": "boolean" } }), &[]),
            SchemaId::GetNetwork => object(json!({ "id": network_id() }), &["id"]),
        }
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn vlan_id() -> Value {
    json!({ "type": "integer", "minimum": 0, "maximum": 4095 })
}

fn name() -> Value {
    json!({ "type": "string", "minLength": 1, "maxLength": 64 })
}

fn description() -> Value {
    json!({ "type": "string", "maxLength": 255 })
}

fn ipv4() -> Value {
    json!({ "type": "string", "pattern": IPV4_PATTERN })
}

fn network_id() -> Value {
    json!({ "type": "string", "pattern": UUID_PATTERN })
}

/// Resolver count is capped by the operations, not here, so the cap gets its
/// own message
fn resolvers() -> Value {
    json!({ "type": "array", "items": ipv4() })
}

fn routes() -> Value {
    json!({
        "type": "object",
        "propertyNames": { "pattern": ROUTE_DESTINATION_PATTERN },
        "additionalProperties": ipv4(),
    })
}
