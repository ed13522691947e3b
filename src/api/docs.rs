use axum::Router;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::tenant::ACCOUNT_UUID_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::vlans::list_vlans_handler,
        crate::api::handlers::vlans::create_vlan_handler,
        crate::api::handlers::vlans::get_vlan_handler,
        crate::api::handlers::vlans::update_vlan_handler,
        crate::api::handlers::vlans::delete_vlan_handler,
        crate::api::handlers::fabric_networks::list_fabric_networks_handler,
        crate::api::handlers::fabric_networks::create_fabric_network_handler,
        crate::api::handlers::fabric_networks::get_fabric_network_handler,
        crate::api::handlers::fabric_networks::update_fabric_network_handler,
        crate::api::handlers::fabric_networks::delete_fabric_network_handler,
        crate::api::handlers::networks::list_networks_handler,
        crate::api::handlers::networks::get_network_handler
    ),
    components(
        schemas(
            crate::api::handlers::health::HealthResponse,
            crate::api::error::ErrorResponse,
            crate::domain::FabricVlan,
            crate::domain::NetworkView,
            crate::domain::VlanCreate,
            crate::domain::VlanUpdate,
            crate::domain::FabricNetworkCreate,
            crate::domain::FabricNetworkUpdate
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "vlans", description = "Tenant fabric VLANs"),
        (name = "fabric-networks", description = "Fabric networks on a tenant VLAN"),
        (name = "networks", description = "Networks and network pools the tenant can provision on")
    ),
    security(
        ("accountUuid" = [])
    ),
    modifiers(&TenantHeaderAddon)
)]
pub struct ApiDoc;

struct TenantHeaderAddon;

impl Modify for TenantHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "accountUuid",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ACCOUNT_UUID_HEADER))),
        );
    }
}

pub fn docs_router() -> Router {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()).into()
}
