use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::api::tenant::Tenant;
use crate::api::util::{merge_params, parse_body};
use crate::domain::NetworkView;
use crate::internal_api::FabricNetworkOperations;

#[allow(unused_imports)]
use crate::api::error::ErrorResponse;
#[allow(unused_imports)]
use crate::domain::{FabricNetworkCreate, FabricNetworkUpdate};

#[utoipa::path(
    get,
    path = "/{account}/fabrics/default/vlans/{vlan_id}/networks",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)")
    ),
    responses(
        (status = 200, description = "Fabric networks on the VLAN", body = [NetworkView]),
        (status = 501, description = "Fabrics not enabled", body = ErrorResponse)
    ),
    tag = "fabric-networks"
)]
pub async fn list_fabric_networks_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<NetworkView>>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = FabricNetworkOperations::new(state.services.clone());
    Ok(Json(ops.list(&ctx, params).await?))
}

#[utoipa::path(
    post,
    path = "/{account}/fabrics/default/vlans/{vlan_id}/networks",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)")
    ),
    request_body = FabricNetworkCreate,
    responses(
        (status = 201, description = "Fabric network created", body = NetworkView),
        (status = 409, description = "Invalid parameters or more than 4 resolvers", body = ErrorResponse),
        (status = 501, description = "Fabrics not enabled", body = ErrorResponse)
    ),
    tag = "fabric-networks"
)]
pub async fn create_fabric_network_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<(StatusCode, Json<NetworkView>), ApiError> {
    state.services.ensure_fabrics_enabled()?;
    let params = merge_params(path, query, parse_body(&body)?)?;
    let ops = FabricNetworkOperations::new(state.services.clone());
    Ok((StatusCode::CREATED, Json(ops.create(&ctx, params).await?)))
}

#[utoipa::path(
    get,
    path = "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)"),
        ("id" = String, Path, description = "Fabric network uuid")
    ),
    responses(
        (status = 200, description = "Fabric network", body = NetworkView),
        (status = 404, description = "Fabric network not found", body = ErrorResponse)
    ),
    tag = "fabric-networks"
)]
pub async fn get_fabric_network_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<NetworkView>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = FabricNetworkOperations::new(state.services.clone());
    Ok(Json(ops.get(&ctx, params).await?))
}

#[utoipa::path(
    put,
    path = "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)"),
        ("id" = String, Path, description = "Fabric network uuid")
    ),
    request_body = FabricNetworkUpdate,
    responses(
        (status = 202, description = "Fabric network updated", body = NetworkView),
        (status = 404, description = "Fabric network not found", body = ErrorResponse),
        (status = 409, description = "Invalid parameters or more than 4 resolvers", body = ErrorResponse)
    ),
    tag = "fabric-networks"
)]
pub async fn update_fabric_network_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<(StatusCode, Json<NetworkView>), ApiError> {
    state.services.ensure_fabrics_enabled()?;
    let params = merge_params(path, query, parse_body(&body)?)?;
    let ops = FabricNetworkOperations::new(state.services.clone());
    Ok((StatusCode::ACCEPTED, Json(ops.update(&ctx, params).await?)))
}

#[utoipa::path(
    delete,
    path = "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)"),
        ("id" = String, Path, description = "Fabric network uuid")
    ),
    responses(
        (status = 204, description = "Fabric network deleted"),
        (status = 404, description = "Fabric network not found", body = ErrorResponse),
        (status = 409, description = "Target is the default network", body = ErrorResponse),
        (status = 500, description = "Default network could not be determined", body = ErrorResponse)
    ),
    tag = "fabric-networks"
)]
pub async fn delete_fabric_network_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = FabricNetworkOperations::new(state.services.clone());
    ops.delete(&ctx, params).await?;
    Ok(StatusCode::NO_CONTENT)
}
