//! Shared test infrastructure for integration tests
//!
//! The router runs with the real NAPI and directory clients pointed at
//! wiremock servers, so every test exercises the full request path down to
//! the backend HTTP calls.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use fabricplane::backend::{DirectoryClient, NapiClient};
use fabricplane::config::NetworkConfig;
use fabricplane::internal_api::NetworkServices;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

pub const OWNER: &str = "930896af-bf8c-48d4-885c-6573a94b1853";
pub const LOGIN: &str = "alice";
pub const REQUEST_ID: &str = "5a1c7e0e-3f7e-4d52-9d3b-0c1f7d6f0001";
pub const DATACENTER: &str = "us-east-1";

pub struct TestApp {
    pub napi: MockServer,
    pub directory: MockServer,
    services: Arc<NetworkServices>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        fabricplane::api::build_router(self.services.clone())
    }
}

pub async fn setup_app(fabrics_enabled: bool) -> TestApp {
    let napi = MockServer::start().await;
    let directory = MockServer::start().await;

    let backend = NapiClient::with_base_url(&napi.uri(), Duration::from_secs(5))
        .expect("build NAPI client");
    let lookup = DirectoryClient::with_base_url(&directory.uri(), Duration::from_secs(5))
        .expect("build directory client");

    let settings = NetworkConfig {
        datacenter: DATACENTER.to_string(),
        fabrics_enabled,
        external_nic_tag: "external".to_string(),
    };
    let services = Arc::new(NetworkServices::new(settings, Arc::new(backend), Arc::new(lookup)));

    TestApp { napi, directory, services }
}

/// Send a request as the test tenant
pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header("x-account-uuid", OWNER)
        .header("x-request-id", REQUEST_ID);
    send(app, builder, body).await
}

/// Send a request as the test tenant with an exact body and optional content type
pub async fn send_raw(
    app: &TestApp,
    method: Method,
    path: &str,
    body: &'static str,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("x-account-uuid", OWNER)
        .header("x-request-id", REQUEST_ID);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).expect("build request");
    app.router().oneshot(request).await.expect("request")
}

/// Send a request without any tenant headers
pub async fn send_anonymous(app: &TestApp, method: Method, path: &str) -> Response<Body> {
    send(app, Request::builder().method(method).uri(path), None).await
}

async fn send(
    app: &TestApp,
    builder: axum::http::request::Builder,
    body: Option<Value>,
) -> Response<Body> {
    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes =
        to_bytes(response.into_body(), usize::MAX).await.expect("read response body as bytes");
    serde_json::from_slice(&bytes).expect("parse json response")
}

pub fn vlans_path() -> String {
    format!("/fabrics/{}/vlans", OWNER)
}

pub fn fabric_networks_path(vlan_id: u16) -> String {
    format!("/fabrics/{}/vlans/{}/networks", OWNER, vlan_id)
}
