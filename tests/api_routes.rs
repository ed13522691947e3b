//! HTTP-level tests for the tenant route table
//!
//! Requests travel through the router, operations and the real backend
//! clients to wiremock stand-ins for NAPI and the directory service.

mod common;

use axum::http::{Method, StatusCode};
use fabricplane::api::error::ErrorResponse;
use fabricplane::domain::{FabricVlan, NetworkView};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{
    fabric_networks_path, read_json, send_anonymous, send_raw, send_request, setup_app,
    vlans_path, DATACENTER, OWNER, REQUEST_ID,
};

const NETWORK_ID: &str = "7b3e6a4e-57d1-4c2a-9f6e-1f0b5d3c2a10";
const DEFAULT_NETWORK_ID: &str = "11111111-2222-4333-8444-555555555555";
const POOL_ID: &str = "c1d6a8f2-0e4b-4f7a-8a3d-2b9e7f1c6d40";

fn fabric_record(uuid: &str, vlan_id: u16) -> Value {
    json!({
        "uuid": uuid,
        "name": "web",
        "description": "",
        "fabric": true,
        "nic_tag": "sdc_overlay",
        "subnet": "192.168.128.0/22",
        "provision_start_ip": "192.168.128.5",
        "provision_end_ip": "192.168.131.250",
        "gateway": "192.168.128.1",
        "internet_nat": true,
        "resolvers": ["8.8.8.8"],
        "vlan_id": vlan_id,
        "mtu": 8500
    })
}

#[tokio::test]
async fn health_endpoint_needs_no_tenant() {
    let app = setup_app(false).await;

    let response = send_anonymous(&app, Method::GET, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fabricplane");
}

#[tokio::test]
async fn missing_tenant_header_is_unauthorized() {
    let app = setup_app(true).await;

    let response = send_anonymous(&app, Method::GET, "/alice/networks").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "Unauthorized");
    assert_eq!(body.message, "missing tenant account");
}

#[tokio::test]
async fn closed_fabric_gate_answers_not_implemented_without_backend_calls() {
    let app = setup_app(false).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&app.napi)
        .await;

    for uri in [
        "/alice/fabrics/default/vlans",
        "/alice/fabrics/default/vlans/12",
        "/alice/fabrics/default/vlans/12/networks",
    ] {
        let response = send_request(&app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED, "{}", uri);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.code, "NotImplemented");
        assert_eq!(body.message, "fabrics not enabled for this datacenter");
    }
}

#[tokio::test]
async fn create_vlan_returns_created_and_forwards_tenant_scope() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .and(path(vlans_path()))
        .and(query_param("fields", "description,name,vlan_id"))
        .and(header("x-request-id", REQUEST_ID))
        .and(body_partial_json(json!({"vlan_id": 12, "name": "web"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vlan_id": 12,
            "name": "web",
            "description": "",
            "owner_uuid": OWNER
        })))
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans",
        Some(json!({"vlan_id": 12, "name": "web", "description": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let vlan: Value = read_json(response).await;
    assert_eq!(vlan, json!({"vlan_id": 12, "name": "web"}));
}

#[tokio::test]
async fn update_vlan_is_accepted() {
    let app = setup_app(true).await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/12", vlans_path())))
        .and(body_partial_json(json!({"name": "backend"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vlan_id": 12,
            "name": "backend",
            "description": "tier two"
        })))
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(
        &app,
        Method::PUT,
        "/alice/fabrics/default/vlans/12",
        Some(json!({"name": "backend"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let vlan: FabricVlan = read_json(response).await;
    assert_eq!(vlan.vlan_id, 12);
    assert_eq!(vlan.description.as_deref(), Some("tier two"));
}

#[tokio::test]
async fn delete_vlan_has_no_content() {
    let app = setup_app(true).await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/12", vlans_path())))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(&app, Method::DELETE, "/alice/fabrics/default/vlans/12", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_json_body_is_invalid_argument() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.napi)
        .await;

    for uri in ["/alice/fabrics/default/vlans", "/alice/fabrics/default/vlans/12/networks"] {
        let response =
            send_raw(&app, Method::POST, uri, "{\"vlan_id\": 12,", Some("application/json"))
                .await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "{}", uri);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.code, "InvalidArgument");
        assert!(body.message.starts_with("request body is not valid JSON"), "{}", body.message);
    }
}

#[tokio::test]
async fn malformed_json_body_with_closed_fabric_gate_is_not_implemented() {
    let app = setup_app(false).await;

    for (method_, uri) in [
        (Method::POST, "/alice/fabrics/default/vlans"),
        (Method::PUT, "/alice/fabrics/default/vlans/12"),
        (Method::POST, "/alice/fabrics/default/vlans/12/networks"),
        (Method::PUT, "/alice/fabrics/default/vlans/12/networks/net-1"),
    ] {
        let response = send_raw(&app, method_, uri, "not json", Some("application/json")).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED, "{}", uri);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.code, "NotImplemented");
    }
}

#[tokio::test]
async fn body_without_content_type_is_still_read() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .and(path(vlans_path()))
        .and(body_partial_json(json!({"vlan_id": 12, "name": "web"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"vlan_id": 12, "name": "web"})),
        )
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_raw(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans",
        r#"{"vlan_id": 12, "name": "web"}"#,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn whole_number_float_vlan_id_is_accepted() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .and(path(vlans_path()))
        .and(body_partial_json(json!({"vlan_id": 4, "name": "web"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"vlan_id": 4, "name": "web"})),
        )
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans",
        Some(json!({"vlan_id": 4.0, "name": "web"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn out_of_range_vlan_id_is_rejected_before_the_backend() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.napi)
        .await;

    let response = send_request(&app, Method::GET, "/alice/fabrics/default/vlans/4096", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "InvalidArgument");
    assert!(body.message.starts_with("property \"vlan_id\""), "{}", body.message);
}

#[tokio::test]
async fn five_resolvers_are_refused_without_backend_call() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.napi)
        .await;

    let response = send_request(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans/12/networks",
        Some(json!({
            "name": "web",
            "subnet": "192.168.128.0/22",
            "provision_start_ip": "192.168.128.5",
            "provision_end_ip": "192.168.131.250",
            "resolvers": ["8.8.8.8", "8.8.4.4", "1.1.1.1", "1.0.0.1", "9.9.9.9"]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "InvalidArgument");
    assert_eq!(body.message, "property \"resolvers\": maximum of 4 resolvers");
}

#[tokio::test]
async fn malformed_gateway_names_the_property() {
    let app = setup_app(true).await;

    let response = send_request(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans/12/networks",
        Some(json!({
            "name": "web",
            "subnet": "192.168.128.0/22",
            "provision_start_ip": "192.168.128.5",
            "provision_end_ip": "192.168.131.250",
            "gateway": "192.168.128"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.message, "property \"gateway\": must be an IPv4 address");
}

#[tokio::test]
async fn create_fabric_network_translates_the_record() {
    let app = setup_app(true).await;
    Mock::given(method("POST"))
        .and(path(fabric_networks_path(12)))
        .and(header("x-request-id", REQUEST_ID))
        .and(body_partial_json(json!({"name": "web", "subnet": "192.168.128.0/22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(fabric_record(NETWORK_ID, 12)))
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(
        &app,
        Method::POST,
        "/alice/fabrics/default/vlans/12/networks",
        Some(json!({
            "name": "web",
            "subnet": "192.168.128.0/22",
            "provision_start_ip": "192.168.128.5",
            "provision_end_ip": "192.168.131.250",
            "gateway": "192.168.128.1",
            "resolvers": ["8.8.8.8"]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let view: NetworkView = read_json(response).await;
    assert_eq!(view.id, NETWORK_ID);
    assert!(!view.public);
    assert_eq!(view.fabric, Some(true));
    assert_eq!(view.vlan_id, Some(12));
    assert_eq!(view.description.as_deref(), Some(""));
}

#[tokio::test]
async fn missing_fabric_network_is_not_found() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/{}", fabric_networks_path(12), NETWORK_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "ResourceNotFound",
            "message": "network not found"
        })))
        .mount(&app.napi)
        .await;

    let uri = format!("/alice/fabrics/default/vlans/12/networks/{}", NETWORK_ID);
    let response = send_request(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "ResourceNotFound");
    assert_eq!(body.message, "network not found");
}

#[tokio::test]
async fn backend_field_errors_become_one_conflict_message() {
    let app = setup_app(true).await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/{}", fabric_networks_path(12), NETWORK_ID)))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": "InvalidParameters",
            "message": "Invalid parameters",
            "errors": [
                {"field": "provision_start_ip", "code": "InvalidParameter", "message": "IP must be within subnet"},
                {"message": "range overlaps an existing network"}
            ]
        })))
        .mount(&app.napi)
        .await;

    let uri = format!("/alice/fabrics/default/vlans/12/networks/{}", NETWORK_ID);
    let response = send_request(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"provision_start_ip": "10.0.0.5"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(
        body.message,
        "property \"provision_start_ip\": IP must be within subnet, range overlaps an existing network"
    );
}

#[tokio::test]
async fn deleting_the_default_network_is_refused() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{}/dclocalconfig/{}", OWNER, DATACENTER)))
        .and(header("x-request-id", REQUEST_ID))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"defaultnetwork": DEFAULT_NETWORK_ID})),
        )
        .expect(1)
        .mount(&app.directory)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.napi)
        .await;

    let uri = format!("/alice/fabrics/default/vlans/12/networks/{}", DEFAULT_NETWORK_ID);
    let response = send_request(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.message, "cannot delete the default network");
}

#[tokio::test]
async fn deleting_another_network_proceeds() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{}/dclocalconfig/{}", OWNER, DATACENTER)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"defaultnetwork": DEFAULT_NETWORK_ID})),
        )
        .mount(&app.directory)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/{}", fabric_networks_path(12), NETWORK_ID)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.napi)
        .await;

    let uri = format!("/alice/fabrics/default/vlans/12/networks/{}", NETWORK_ID);
    let response = send_request(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn undeterminable_default_network_is_internal() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.directory)
        .await;

    let uri = format!("/alice/fabrics/default/vlans/12/networks/{}", NETWORK_ID);
    let response = send_request(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.code, "Internal");
    assert_eq!(body.message, "unable to determine default network");
}

#[tokio::test]
async fn network_listing_folds_pool_members_and_echoes_request_id() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .and(path("/network_pools"))
        .and(query_param("provisionable_by", OWNER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "uuid": POOL_ID,
            "name": "public-pool",
            "nic_tag": "external",
            "networks": ["a0000000-0000-4000-8000-000000000001"]
        }])))
        .mount(&app.napi)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks"))
        .and(query_param("provisionable_by", OWNER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"uuid": "a0000000-0000-4000-8000-000000000001", "name": "external-1", "nic_tag": "external"},
            {"uuid": "a0000000-0000-4000-8000-000000000002", "name": "admin", "nic_tag": "admin"},
            fabric_record(NETWORK_ID, 12)
        ])))
        .mount(&app.napi)
        .await;

    let response = send_request(&app, Method::GET, "/alice/networks", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some(REQUEST_ID)
    );

    let views: Vec<NetworkView> = read_json(response).await;
    let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, [POOL_ID, "a0000000-0000-4000-8000-000000000002", NETWORK_ID]);
    assert!(views[0].public);
    assert!(!views[1].public);
    assert!(!views[2].public);
}

#[tokio::test]
async fn network_listing_can_be_restricted_to_fabrics() {
    let app = setup_app(true).await;
    Mock::given(method("GET"))
        .and(path("/network_pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "uuid": POOL_ID,
            "name": "fabric-pool",
            "networks": [NETWORK_ID]
        }])))
        .mount(&app.napi)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"uuid": "a0000000-0000-4000-8000-000000000002", "name": "admin", "nic_tag": "admin"},
            fabric_record(NETWORK_ID, 12)
        ])))
        .mount(&app.napi)
        .await;

    let response = send_request(&app, Method::GET, "/alice/networks?fabric=true", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let views: Vec<NetworkView> = read_json(response).await;
    let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, [NETWORK_ID]);
}

#[tokio::test]
async fn get_network_falls_back_to_pool() {
    let app = setup_app(false).await;
    Mock::given(method("GET"))
        .and(path(format!("/networks/{}", POOL_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "ResourceNotFound",
            "message": "network not found"
        })))
        .mount(&app.napi)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/network_pools/{}", POOL_ID)))
        .and(query_param("provisionable_by", OWNER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": POOL_ID,
            "name": "public-pool",
            "nic_tag": "external",
            "networks": ["a0000000-0000-4000-8000-000000000001"]
        })))
        .expect(1)
        .mount(&app.napi)
        .await;

    let response = send_request(&app, Method::GET, &format!("/alice/networks/{}", POOL_ID), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view: NetworkView = read_json(response).await;
    assert_eq!(view.id, POOL_ID);
    assert_eq!(view.name, "public-pool");
    assert!(view.public);
}

#[tokio::test]
async fn generated_request_id_is_returned_when_caller_sends_none() {
    let app = setup_app(true).await;

    let response = send_anonymous(&app, Method::GET, "/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}
