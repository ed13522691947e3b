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
use crate::domain::FabricVlan;
use crate::internal_api::VlanOperations;

#[allow(unused_imports)]
use crate::api::error::ErrorResponse;
#[allow(unused_imports)]
use crate::domain::{VlanCreate, VlanUpdate};

#[utoipa::path(
    get,
    path = "/{account}/fabrics/default/vlans",
    params(("account" = String, Path, description = "Tenant login")),
    responses(
        (status = 200, description = "Fabric VLANs of the tenant", body = [FabricVlan]),
        (status = 501, description = "Fabrics not enabled", body = ErrorResponse)
    ),
    tag = "vlans"
)]
pub async fn list_vlans_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<FabricVlan>>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = VlanOperations::new(state.services.clone());
    Ok(Json(ops.list(&ctx, params).await?))
}

#[utoipa::path(
    post,
    path = "/{account}/fabrics/default/vlans",
    params(("account" = String, Path, description = "Tenant login")),
    request_body = VlanCreate,
    responses(
        (status = 201, description = "VLAN created", body = FabricVlan),
        (status = 409, description = "Invalid parameters", body = ErrorResponse),
        (status = 501, description = "Fabrics not enabled", body = ErrorResponse)
    ),
    tag = "vlans"
)]
pub async fn create_vlan_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<(StatusCode, Json<FabricVlan>), ApiError> {
    state.services.ensure_fabrics_enabled()?;
    let params = merge_params(path, query, parse_body(&body)?)?;
    let ops = VlanOperations::new(state.services.clone());
    Ok((StatusCode::CREATED, Json(ops.create(&ctx, params).await?)))
}

#[utoipa::path(
    get,
    path = "/{account}/fabrics/default/vlans/{vlan_id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)")
    ),
    responses(
        (status = 200, description = "VLAN", body = FabricVlan),
        (status = 404, description = "VLAN not found", body = ErrorResponse)
    ),
    tag = "vlans"
)]
pub async fn get_vlan_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<FabricVlan>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = VlanOperations::new(state.services.clone());
    Ok(Json(ops.get(&ctx, params).await?))
}

#[utoipa::path(
    put,
    path = "/{account}/fabrics/default/vlans/{vlan_id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)")
    ),
    request_body = VlanUpdate,
    responses(
        (status = 202, description = "VLAN updated", body = FabricVlan),
        (status = 404, description = "VLAN not found", body = ErrorResponse),
        (status = 409, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "vlans"
)]
pub async fn update_vlan_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<(StatusCode, Json<FabricVlan>), ApiError> {
    state.services.ensure_fabrics_enabled()?;
    let params = merge_params(path, query, parse_body(&body)?)?;
    let ops = VlanOperations::new(state.services.clone());
    Ok((StatusCode::ACCEPTED, Json(ops.update(&ctx, params).await?)))
}

#[utoipa::path(
    delete,
    path = "/{account}/fabrics/default/vlans/{vlan_id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("vlan_id" = u16, Path, description = "VLAN id (0-4095)")
    ),
    responses(
        (status = 204, description = "VLAN deleted"),
        (status = 404, description = "VLAN not found", body = ErrorResponse)
    ),
    tag = "vlans"
)]
pub async fn delete_vlan_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = VlanOperations::new(state.services.clone());
    ops.delete(&ctx, params).await?;
    Ok(StatusCode::NO_CONTENT)
}
