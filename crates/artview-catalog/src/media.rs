//! Resolution of CMS image references to public, absolute URLs.
//!
//! Resolution never fails loudly: anything unrecognized becomes an empty
//! string so one bad record cannot block its siblings.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ImageField;

/// Public prefix for `wix:image://` media ids.
pub const WIX_IMAGE_BASE: &str = "https://static.wixstatic.com/media/";

/// Public prefix for `wix:document://` media ids.
pub const WIX_DOCUMENT_BASE: &str = "https://static.wixstatic.com/ugd/";

static WIX_MEDIA_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^wix:(image|document)://v1/([^/#?]+)").expect("valid wix media regex")
});

/// Resolves an image field of any supported shape to an absolute URL.
///
/// Returns an empty string when the field is missing or unresolvable.
#[must_use]
pub fn normalize_image_url(field: Option<&ImageField>) -> String {
    let raw = match field {
        Some(ImageField::Url(s)) => Some(s.as_str()),
        Some(ImageField::Object(obj)) => obj.first_url(),
        Some(ImageField::Other(_)) | None => None,
    };
    raw.map(normalize_image_ref).unwrap_or_default()
}

/// Resolves a single string reference.
///
/// - absolute `http(s)://` URLs pass through unchanged;
/// - `wix:image://v1/<id>/...` becomes `<WIX_IMAGE_BASE><id>`;
/// - `wix:document://v1/<id>/...` becomes `<WIX_DOCUMENT_BASE><id>`;
/// - anything else becomes `""`.
#[must_use]
pub fn normalize_image_ref(raw: &str) -> String {
    let trimmed = raw.trim();

    if is_absolute_http(trimmed) {
        return trimmed.to_string();
    }

    if let Some(caps) = WIX_MEDIA_REF.captures(trimmed) {
        let base = match &caps[1] {
            "image" => WIX_IMAGE_BASE,
            _ => WIX_DOCUMENT_BASE,
        };
        return format!("{base}{}", &caps[2]);
    }

    if !trimmed.is_empty() {
        tracing::debug!(reference = %trimmed, "unrecognized image reference");
    }
    String::new()
}

fn is_absolute_http(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    (lower.starts_with("https://") && s.len() > 8) || (lower.starts_with("http://") && s.len() > 7)
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
