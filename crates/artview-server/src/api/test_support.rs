//! Shared fixtures for route tests: an app wired to a `wiremock` content
//! store and a helper to drive it with `oneshot`.

use artview_catalog::{ContentClient, SiteLinks, VariantResolver};
use artview_core::Calibration;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{build_app, AppState};

pub(super) const VARIANTS_PATH: &str = "/_functions/variants";
pub(super) const SITE: &str = "https://www.ikonhaus.art";

fn app_for_endpoint(endpoint: &str) -> Router {
    let client = ContentClient::new(endpoint, 5, "artview-test/0.1").expect("test client");
    build_app(AppState {
        resolver: VariantResolver::new(client, SiteLinks::new(SITE)),
        calibration: Calibration::default(),
    })
}

pub(super) fn test_app(server: &MockServer) -> Router {
    app_for_endpoint(&format!("{}{VARIANTS_PATH}", server.uri()))
}

/// App whose content store is never contacted by the routes under test.
pub(super) fn test_app_unreachable() -> Router {
    app_for_endpoint("http://127.0.0.1:9/_functions/variants")
}

pub(super) async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
    get_with_headers(app, uri, &[]).await
}

pub(super) async fn get_with_headers(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

/// One variant record of "Madness is Genius" whose image is served by
/// `server` under `/media/<sku>.png`.
pub(super) fn record(server: &MockServer, sku: &str, size: &str, sort_index: u32) -> serde_json::Value {
    json!({
        "title": "Madness is Genius",
        "artworkSlug": "madness-is-genius",
        "sku": sku,
        "sizeCode": size,
        "frameColor": "Black",
        "orientation": "PORTRAIT",
        "image": format!("{}/media/{sku}.png", server.uri()),
        "sortIndex": sort_index
    })
}

pub(super) fn madness_items(server: &MockServer) -> serde_json::Value {
    json!({
        "items": [
            record(server, "MAD-1620", "16 x 20 inches", 2),
            record(server, "MAD-1114", "11 x 14 inches", 1)
        ]
    })
}

pub(super) async fn mount_records(
    server: &MockServer,
    key: &str,
    value: &str,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(VARIANTS_PATH))
        .and(query_param(key, value))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub(super) async fn mount_image(server: &MockServer, sku: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/media/{sku}.png")))
        .respond_with(template)
        .mount(server)
        .await;
}
