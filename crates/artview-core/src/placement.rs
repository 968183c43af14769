//! Real-world placement of the artwork plane.
//!
//! Two independent multipliers apply to the print's physical size:
//!
//! - the **physical correction** compensates a systematic under-scale of the
//!   rendered plane and applies in both modes;
//! - the **preview boost** enlarges the artwork for the small on-page preview
//!   card and must never apply in immersive mode, where true-to-life size is
//!   the whole point.
//!
//! Both are product-tunable; see [`Calibration`].

use serde::{Deserialize, Serialize};

use crate::products::ProductVariant;

/// Plane position in immersive AR: roughly eye height, a short step in front
/// of the viewer.
pub const IMMERSIVE_POSITION: Vec3 = Vec3::new(0.0, 1.4, -2.0);

/// Plane position in the flat preview: centered and further back for
/// card-style framing.
pub const PREVIEW_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);

/// Empirical correction applied to both dimensions in every mode.
pub const DEFAULT_PHYSICAL_CORRECTION: f64 = 1.22;

/// Cosmetic enlargement applied only in preview mode.
pub const DEFAULT_PREVIEW_BOOST: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub position: Vec3,
    pub display_width_meters: f64,
    pub display_height_meters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub physical_correction: f64,
    pub preview_boost: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            physical_correction: DEFAULT_PHYSICAL_CORRECTION,
            preview_boost: DEFAULT_PREVIEW_BOOST,
        }
    }
}

impl Calibration {
    /// Multiplier applied to each dimension for the given mode.
    #[must_use]
    pub fn scale(&self, presenting: bool) -> f64 {
        if presenting {
            self.physical_correction
        } else {
            self.physical_correction * self.preview_boost
        }
    }

    /// Computes the plane transform for `variant`.
    ///
    /// Total: zero, negative or non-finite dimensions produce a zero-size
    /// plane at the mode's position.
    #[must_use]
    pub fn place(&self, variant: &ProductVariant, presenting: bool) -> PlacementResult {
        let position = if presenting {
            IMMERSIVE_POSITION
        } else {
            PREVIEW_POSITION
        };
        let scale = self.scale(presenting);

        PlacementResult {
            position,
            display_width_meters: sanitize(variant.width_meters) * scale,
            display_height_meters: sanitize(variant.height_meters) * scale,
        }
    }
}

/// [`Calibration::place`] with the default calibration constants.
#[must_use]
pub fn place(variant: &ProductVariant, presenting: bool) -> PlacementResult {
    Calibration::default().place(variant, presenting)
}

fn sanitize(meters: f64) -> f64 {
    if meters.is_finite() && meters > 0.0 {
        meters
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "placement_test.rs"]
mod tests;
