mod capabilities;
mod placement;
mod products;
mod texture;

#[cfg(test)]
mod test_support;

use artview_catalog::{LoadError, Selector, VariantResolver};
use artview_core::{Calibration, Product};
use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Debug, Clone)]
pub struct AppState {
    pub resolver: VariantResolver,
    pub calibration: Calibration,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "texture_unavailable" => StatusCode::FAILED_DEPENDENCY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a catalog failure onto the API error vocabulary.
///
/// Transport failures are logged here with full detail; the response only
/// says the content store could not be reached.
pub(super) fn map_load_error(request_id: String, error: &LoadError) -> ApiError {
    match error {
        LoadError::NoSelector => ApiError::new(request_id, "bad_request", error.to_string()),
        LoadError::EmptyResult { .. } => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        LoadError::TexturePreload { .. } => {
            tracing::warn!(error = %error, "texture preload failed");
            ApiError::new(request_id, "texture_unavailable", error.to_string())
        }
        e if e.is_transport() => {
            tracing::error!(error = %e, "content store request failed");
            ApiError::new(request_id, "upstream_error", "content store request failed")
        }
        e => {
            tracing::error!(error = %e, "unexpected catalog failure");
            ApiError::new(request_id, "internal_error", "internal error")
        }
    }
}

/// Unwraps a query-string extraction, reporting a malformed query (for
/// example `presenting=yes`) in the API error envelope.
pub(super) fn parse_query<T>(
    request_id: &str,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::new(request_id, "bad_request", e.body_text()))
}

/// Resolves `selector` and maps any failure to an [`ApiError`].
pub(super) async fn resolve(
    state: &AppState,
    request_id: &str,
    selector: &Selector,
) -> Result<Product, ApiError> {
    state
        .resolver
        .resolve_product(selector)
        .await
        .map_err(|e| map_load_error(request_id.to_owned(), &e))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products/{slug}", get(products::get_product))
        .route("/api/v1/variants/{sku}", get(products::get_variant))
        .route("/api/v1/placement", get(placement::get_placement))
        .route("/api/v1/capabilities", get(capabilities::get_capabilities))
        .route("/api/v1/texture", get(texture::get_texture))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse::new(HealthData { status: "ok" }, req_id.0))
}
