use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::internal_api::NetworkServices;

use super::{
    docs,
    handlers::{
        create_fabric_network_handler, create_vlan_handler, delete_fabric_network_handler,
        delete_vlan_handler, get_fabric_network_handler, get_network_handler, get_vlan_handler,
        health_handler, list_fabric_networks_handler, list_networks_handler, list_vlans_handler,
        update_fabric_network_handler, update_vlan_handler,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub services: Arc<NetworkServices>,
}

pub fn build_router(services: Arc<NetworkServices>) -> Router {
    let api_state = ApiState { services };

    let tenant_api = Router::new()
        .route(
            "/{account}/fabrics/default/vlans",
            get(list_vlans_handler).post(create_vlan_handler),
        )
        .route(
            "/{account}/fabrics/default/vlans/{vlan_id}",
            get(get_vlan_handler).put(update_vlan_handler).delete(delete_vlan_handler),
        )
        .route(
            "/{account}/fabrics/default/vlans/{vlan_id}/networks",
            get(list_fabric_networks_handler).post(create_fabric_network_handler),
        )
        .route(
            "/{account}/fabrics/default/vlans/{vlan_id}/networks/{id}",
            get(get_fabric_network_handler)
                .put(update_fabric_network_handler)
                .delete(delete_fabric_network_handler),
        )
        .route("/{account}/networks", get(list_networks_handler))
        .route("/{account}/networks/{id}", get(get_network_handler))
        .with_state(api_state);

    Router::new()
        .route("/health", get(health_handler))
        .merge(tenant_api)
        .merge(docs::docs_router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
