use serde::{Deserialize, Serialize};

/// Exact inches-to-meters factor applied to every parsed print dimension.
pub const INCHES_TO_METERS: f64 = 0.0254;

/// Print orientation as reported by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    /// Missing or unrecognized; dimensions are kept in the order written.
    Unspecified,
}

impl Orientation {
    /// Interprets a raw orientation string. Comparison is trimmed and
    /// case-insensitive; anything unrecognized is [`Orientation::Unspecified`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("portrait") => Self::Portrait,
            Some(s) if s.eq_ignore_ascii_case("landscape") => Self::Landscape,
            _ => Self::Unspecified,
        }
    }
}

/// An artwork grouping one or more purchasable variants, rebuilt from scratch
/// on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Artwork slug, e.g. `"madness-is-genius"`.
    pub id: String,
    pub title: String,
    /// Always the id of a member of `variants`.
    pub default_variant_id: String,
    /// Commerce product-detail page.
    pub detail_url: String,
    /// Sorted by the content store's sort index (stable).
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns the default variant.
    ///
    /// `None` only for a product with no variants, which the catalog never
    /// builds.
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.select_variant(&self.default_variant_id)
    }

    /// Looks up a variant by id, falling back to the first variant when the id
    /// is stale or unknown.
    #[must_use]
    pub fn select_variant(&self, id: &str) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.id == id)
            .or_else(|| self.variants.first())
    }

    /// Returns `true` if `id` names one of this product's variants.
    #[must_use]
    pub fn contains_variant(&self, id: &str) -> bool {
        self.variants.iter().any(|v| v.id == id)
    }
}

/// A purchasable size/color combination of an artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// The variant SKU.
    pub id: String,
    /// Display string, e.g. `"Black | 16 x 20 inches"`.
    pub label: String,
    pub width_meters: f64,
    pub height_meters: f64,
    /// Absolute image URL, or empty when the source reference could not be
    /// resolved.
    pub image_url: String,
    /// Size text exactly as the content store wrote it.
    pub size_text: String,
    pub frame_color: String,
    pub orientation: Orientation,
    /// Add-to-cart action for this SKU.
    pub cart_url: String,
}

impl ProductVariant {
    /// A variant whose size text yielded no usable numbers has a zero
    /// dimension and cannot be placed meaningfully.
    #[must_use]
    pub fn has_usable_size(&self) -> bool {
        self.width_meters > 0.0 && self.height_meters > 0.0
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}
