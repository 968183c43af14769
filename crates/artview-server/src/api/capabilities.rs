use artview_core::{detect, Capabilities, ClientEnvironment, ViewMode};
use axum::{
    extract::{rejection::QueryRejection, Query, RawQuery},
    http::{header::USER_AGENT, HeaderMap},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{parse_query, ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct CapabilitiesQuery {
    /// Whether the browser exposes the AR session-request object.
    #[serde(default)]
    pub xr: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CapabilitiesData {
    #[serde(flatten)]
    capabilities: Capabilities,
    view_mode: ViewMode,
}

/// `GET /api/v1/capabilities?forceMode=&xr=`: classifies the calling browser
/// from its `User-Agent` header. The raw query is handed to the detector so
/// `forceMode` is read exactly as a page URL would carry it.
pub(super) async fn get_capabilities(
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<CapabilitiesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CapabilitiesData>>, ApiError> {
    let query = parse_query(&req_id.0, query)?;
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let env = ClientEnvironment {
        user_agent,
        vendor: None,
        query: raw_query,
        xr_present: query.xr,
    };
    let capabilities = detect(Some(&env));
    tracing::debug!(?capabilities, "detected client capabilities");

    Ok(Json(ApiResponse::new(
        CapabilitiesData {
            view_mode: capabilities.view_mode(),
            capabilities,
        },
        req_id.0,
    )))
}
