//! Wire types for the content store's variant collection.
//!
//! ## Observed shape
//!
//! The store answers `GET <endpoint>?artworkSlug=<slug>` and
//! `GET <endpoint>?sku=<sku>` with `{ "items": [...] }`. Records are
//! hand-maintained in a CMS, so every field except `sku` may be absent or
//! `null`, and free-text fields are modelled as `Option<String>` for that
//! reason.
//!
//! ### `image`
//! Depending on how the collection field was configured the image arrives as
//! a plain string (`"wix:image://v1/<id>/name.png#..."` or an absolute URL),
//! as an object carrying the URL under `url`, `src` or `fileUrl`, or as
//! something else entirely. Older collections name the field `imageField` or
//! `mainImage`. See [`ImageField`].
//!
//! ### `sortIndex`
//! Numeric, sometimes fractional, often missing. Missing sorts as `0`.

use serde::Deserialize;

/// Top-level response from the variant collection endpoint.
#[derive(Debug, Deserialize)]
pub struct VariantRecordsResponse {
    #[serde(default)]
    pub items: Vec<RawVariantRecord>,
}

/// A single variant row as stored in the CMS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariantRecord {
    /// Artwork display title (e.g., `"Madness is Genius"`).
    #[serde(default)]
    pub title: Option<String>,

    /// Artwork slug shared by all sibling variants.
    #[serde(default)]
    pub artwork_slug: Option<String>,

    /// Unique stock-keeping unit; becomes the variant id.
    pub sku: String,

    /// Free-text print size, e.g. `"16 x 20 inches"`.
    #[serde(default)]
    pub size_code: Option<String>,

    /// Free-text frame color, e.g. `"Black"`.
    #[serde(default)]
    pub frame_color: Option<String>,

    /// `"PORTRAIT"`, `"LANDSCAPE"`, or anything else.
    #[serde(default)]
    pub orientation: Option<String>,

    #[serde(default, alias = "imageField", alias = "mainImage")]
    pub image: Option<ImageField>,

    #[serde(default)]
    pub sort_index: Option<f64>,

    /// Explicit commerce product-detail URL, when the editor filled it in.
    #[serde(default)]
    pub product_page_url: Option<String>,

    /// Commerce product slug used to derive the detail URL.
    #[serde(default)]
    pub product_slug: Option<String>,
}

/// The polymorphic image field.
///
/// Variant order matters: serde tries them top to bottom, so anything that is
/// neither a string nor a URL-bearing object lands in [`ImageField::Other`]
/// instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Url(String),
    Object(ImageObject),
    Other(serde_json::Value),
}

/// Object form of [`ImageField`]. The first non-empty field in
/// `url`, `src`, `fileUrl` order wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

impl ImageObject {
    #[must_use]
    pub fn first_url(&self) -> Option<&str> {
        [&self.url, &self.src, &self.file_url]
            .into_iter()
            .filter_map(Option::as_deref)
            .find(|s| !s.trim().is_empty())
    }
}
