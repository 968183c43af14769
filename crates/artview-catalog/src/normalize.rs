//! Normalization from raw CMS records to [`artview_core::Product`].
//!
//! Size parsing is delegated to [`crate::parse`] and image resolution to
//! [`crate::media`]; this module handles ordering, identity, links and the
//! default-variant choice.

use artview_core::{Orientation, Product, ProductVariant};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::LoadError;
use crate::media::normalize_image_url;
use crate::parse::parse_dimensions_meters;
use crate::types::RawVariantRecord;

/// Slug used when no record names its artwork.
pub const UNKNOWN_ARTWORK_SLUG: &str = "unknown-artwork";

/// Path segment under the site root where product-detail pages live.
const PRODUCT_PAGE_PATH: &str = "product-page";

/// Everything but RFC 3986 unreserved characters is escaped in a hand-built
/// cart query.
const CART_QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds commerce links for a product and its variants.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    site_root: String,
}

impl SiteLinks {
    #[must_use]
    pub fn new(site_root: &str) -> Self {
        Self {
            site_root: site_root.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn site_root(&self) -> &str {
        &self.site_root
    }

    /// Detail page: an explicit URL if any record carries one, else the page
    /// derived from the commerce product slug, else the site root.
    #[must_use]
    pub fn detail_url(&self, records: &[RawVariantRecord]) -> String {
        if let Some(url) = records
            .iter()
            .find_map(|r| non_blank(r.product_page_url.as_deref()))
        {
            return url.to_string();
        }

        if let Some(slug) = records
            .iter()
            .find_map(|r| non_blank(r.product_slug.as_deref()))
        {
            return format!("{}/{PRODUCT_PAGE_PATH}/{slug}", self.site_root);
        }

        self.site_root.clone()
    }

    /// Add-to-cart action for `sku`, with the sku query-encoded.
    #[must_use]
    pub fn cart_url(&self, sku: &str) -> String {
        let base = format!("{}/cart", self.site_root);
        match reqwest::Url::parse(&base) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("add", sku);
                url.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    site_root = %self.site_root,
                    error = %e,
                    "site root is not a valid URL base; building cart link by hand"
                );
                format!("{base}?add={}", utf8_percent_encode(sku, CART_QUERY_ENCODE_SET))
            }
        }
    }
}

/// Builds a [`Product`] from the records of one artwork.
///
/// Records are stably sorted by `sortIndex` (missing = 0). Identity and title
/// come from the first sorted record. The default variant is
/// `requested_sku` when it names a produced variant, else the first.
///
/// Per-variant image failures are not errors: the variant gets an empty
/// `image_url` and the rest of the product still builds.
///
/// # Errors
///
/// Returns [`LoadError::EmptyResult`] if `records` is empty.
pub fn build_product(
    mut records: Vec<RawVariantRecord>,
    requested_sku: Option<&str>,
    links: &SiteLinks,
) -> Result<Product, LoadError> {
    if records.is_empty() {
        return Err(LoadError::EmptyResult {
            selector: requested_sku.map_or_else(
                || "empty record set".to_string(),
                |sku| format!("sku {sku}"),
            ),
        });
    }

    // `sort_by` is stable, so equal indices keep fetch order.
    records.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));

    let first = &records[0];
    let id = non_blank(first.artwork_slug.as_deref())
        .unwrap_or(UNKNOWN_ARTWORK_SLUG)
        .to_string();
    let title = non_blank(first.title.as_deref()).map_or_else(|| id.clone(), str::to_string);
    let detail_url = links.detail_url(&records);

    let variants: Vec<ProductVariant> = records
        .iter()
        .map(|record| normalize_variant(record, links))
        .collect();

    let mut product = Product {
        id,
        title,
        default_variant_id: variants[0].id.clone(),
        detail_url,
        variants,
    };
    if let Some(sku) = requested_sku.filter(|sku| product.contains_variant(sku)) {
        product.default_variant_id = sku.to_string();
    }

    Ok(product)
}

/// Normalizes a single record into a [`ProductVariant`].
fn normalize_variant(record: &RawVariantRecord, links: &SiteLinks) -> ProductVariant {
    let size_text = record.size_code.clone().unwrap_or_default();
    let frame_color = record
        .frame_color
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let orientation = Orientation::from_raw(record.orientation.as_deref());
    let (width_meters, height_meters) = parse_dimensions_meters(&size_text, &orientation);

    if width_meters <= 0.0 || height_meters <= 0.0 {
        tracing::warn!(
            sku = %record.sku,
            size_text = %size_text,
            "size text did not yield two dimensions; variant is not placeable"
        );
    }

    let image_url = normalize_image_url(record.image.as_ref());
    if image_url.is_empty() {
        tracing::warn!(sku = %record.sku, "variant image could not be resolved");
    }

    ProductVariant {
        id: record.sku.clone(),
        label: variant_label(&frame_color, &size_text, &record.sku),
        width_meters,
        height_meters,
        image_url,
        size_text,
        frame_color,
        orientation,
        cart_url: links.cart_url(&record.sku),
    }
}

/// `"<color> | <size>"`, degrading to whichever part is present, then to the
/// sku.
fn variant_label(frame_color: &str, size_text: &str, sku: &str) -> String {
    let size = size_text.trim();
    match (frame_color.is_empty(), size.is_empty()) {
        (false, false) => format!("{frame_color} | {size}"),
        (false, true) => frame_color.to_string(),
        (true, false) => size.to_string(),
        (true, true) => sku.to_string(),
    }
}

fn sort_key(record: &RawVariantRecord) -> f64 {
    record.sort_index.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
