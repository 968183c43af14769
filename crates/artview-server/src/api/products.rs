use artview_catalog::Selector;
use artview_core::Product;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{parse_query, resolve, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub sku: Option<String>,
}

/// `GET /api/v1/products/{slug}?sku=`: the product for an artwork slug, with
/// `sku` only choosing the default variant.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let query = parse_query(&req_id.0, query)?;
    let selector = Selector {
        slug: Some(slug),
        sku: query.sku,
    };
    let product = resolve(&state, &req_id.0, &selector).await?;
    Ok(Json(ApiResponse::new(product, req_id.0)))
}

/// `GET /api/v1/variants/{sku}`: the full product a sku belongs to, with that
/// sku as the default variant.
pub(super) async fn get_variant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(sku): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = resolve(&state, &req_id.0, &Selector::by_sku(sku)).await?;
    Ok(Json(ApiResponse::new(product, req_id.0)))
}
