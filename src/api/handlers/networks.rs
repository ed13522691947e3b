use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::api::tenant::Tenant;
use crate::api::util::merge_params;
use crate::domain::NetworkView;
use crate::internal_api::NetworkOperations;

#[allow(unused_imports)]
use crate::api::error::ErrorResponse;

#[utoipa::path(
    get,
    path = "/{account}/networks",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("fabric" = Option<bool>, Query, description = "Only list fabric networks")
    ),
    responses(
        (status = 200, description = "Pools first, then networks not covered by a pool", body = [NetworkView])
    ),
    tag = "networks"
)]
pub async fn list_networks_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<NetworkView>>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = NetworkOperations::new(state.services.clone());
    Ok(Json(ops.list(&ctx, params).await?))
}

#[utoipa::path(
    get,
    path = "/{account}/networks/{id}",
    params(
        ("account" = String, Path, description = "Tenant login"),
        ("id" = String, Path, description = "Network or network pool uuid")
    ),
    responses(
        (status = 200, description = "Network or pool", body = NetworkView),
        (status = 404, description = "Neither a network nor a pool", body = ErrorResponse)
    ),
    tag = "networks"
)]
pub async fn get_network_handler(
    State(state): State<ApiState>,
    Tenant(ctx): Tenant,
    Path(path): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<NetworkView>, ApiError> {
    let params = merge_params(path, query, None)?;
    let ops = NetworkOperations::new(state.services.clone());
    Ok(Json(ops.get(&ctx, params).await?))
}
