use artview_catalog::Selector;
use artview_core::PlacementResult;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{parse_query, resolve, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PlacementQuery {
    pub slug: Option<String>,
    pub sku: Option<String>,
    #[serde(default)]
    pub presenting: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlacementData {
    product_id: String,
    variant_id: String,
    presenting: bool,
    #[serde(flatten)]
    placement: PlacementResult,
}

/// `GET /api/v1/placement?slug=&sku=&presenting=`: where and how large the
/// selected variant is drawn in the requested mode.
pub(super) async fn get_placement(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<PlacementQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PlacementData>>, ApiError> {
    let query = parse_query(&req_id.0, query)?;
    let selector = Selector {
        slug: query.slug,
        sku: query.sku,
    };
    let product = resolve(&state, &req_id.0, &selector).await?;

    let Some(variant) = product.default_variant() else {
        return Err(ApiError::new(
            req_id.0,
            "internal_error",
            "resolved product has no variants",
        ));
    };

    let data = PlacementData {
        product_id: product.id.clone(),
        variant_id: variant.id.clone(),
        presenting: query.presenting,
        placement: state.calibration.place(variant, query.presenting),
    };
    Ok(Json(ApiResponse::new(data, req_id.0)))
}
