//! Internal API Types
//!
//! Typed views over validated parameter maps. Each operation validates the
//! merged map first, then picks its keys and payload out with these.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::internal_api::error::InternalError;
use crate::validation::Params;

/// Upper bound on resolvers for a fabric network
pub const MAX_RESOLVERS: usize = 4;

/// Path key of a fabric VLAN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VlanKey {
    pub vlan_id: u16,
}

/// Path key of a fabric network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FabricNetworkKey {
    pub vlan_id: u16,
    pub id: String,
}

/// Path key of a network or pool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkKey {
    pub id: String,
}

/// Query filter for network listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NetworkListFilter {
    #[serde(default)]
    pub fabric: bool,
}

/// Deserialize a typed view out of validated parameters
pub fn from_params<T: DeserializeOwned>(params: &Params) -> Result<T, InternalError> {
    serde_json::from_value(serde_json::Value::Object(params.clone()))
        .map_err(|e| InternalError::invalid_argument(e.to_string()))
}
