use artview_catalog::Selector;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_load_error, parse_query, resolve, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TextureQuery {
    pub slug: Option<String>,
    pub sku: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TextureData {
    variant_id: String,
    image_url: String,
    ready: bool,
}

/// `GET /api/v1/texture?slug=&sku=`: checks that the selected variant's image
/// loads. The front-end enables its AR entry only after a `ready` answer.
pub(super) async fn get_texture(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<TextureQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<TextureData>>, ApiError> {
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

    state
        .resolver
        .client()
        .preload_texture(&variant.image_url)
        .await
        .map_err(|e| map_load_error(req_id.0.clone(), &e))?;

    let data = TextureData {
        variant_id: variant.id.clone(),
        image_url: variant.image_url.clone(),
        ready: true,
    };
    Ok(Json(ApiResponse::new(data, req_id.0)))
}
