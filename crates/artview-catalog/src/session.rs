//! Viewer state across navigations: which product and variant are current,
//! whether the selected texture is ready, and whether AR is presenting.
//!
//! Resolutions and texture preloads run asynchronously and may finish after
//! the user has already moved on. Each navigation takes a [`SelectionToken`]
//! from the session's [`SelectionGuard`]; a result is only applied when its
//! token is still the newest. Texture checks carry a job generation; only
//! the latest job for the current selection may report back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use artview_core::{Calibration, PlacementResult, Product, ProductVariant};

use crate::error::LoadError;

/// Issues monotonically increasing tokens; only the latest one is current.
#[derive(Debug, Clone, Default)]
pub struct SelectionGuard {
    generation: Arc<AtomicU64>,
}

impl SelectionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every token issued before.
    #[must_use]
    pub fn begin(&self) -> SelectionToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SelectionToken {
            generation,
            current: Arc::clone(&self.generation),
        }
    }
}

/// Captured at request start; checked before committing the result.
#[derive(Debug, Clone)]
pub struct SelectionToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl SelectionToken {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// One texture check handed out by [`ViewerSession::begin_texture_preload`].
/// Only the most recently issued job may report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePreloadJob {
    pub variant_id: String,
    pub image_url: String,
    generation: u64,
}

#[derive(Debug)]
struct TextureSlot {
    variant_id: String,
    generation: u64,
    state: TextureState,
}

#[derive(Debug, Default)]
pub struct ViewerSession {
    guard: SelectionGuard,
    product: Option<Product>,
    last_error: Option<String>,
    selected_variant_id: Option<String>,
    texture: Option<TextureSlot>,
    preload_generation: u64,
    presenting: bool,
}

impl ViewerSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a navigation. Any resolution still in flight becomes stale.
    #[must_use]
    pub fn begin_navigation(&mut self) -> SelectionToken {
        self.presenting = false;
        self.guard.begin()
    }

    /// Applies a finished resolution if `token` is still current.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn commit_product(
        &mut self,
        token: &SelectionToken,
        result: Result<Product, LoadError>,
    ) -> bool {
        if !token.is_current() {
            tracing::debug!("discarding superseded product resolution");
            return false;
        }

        self.texture = None;
        self.presenting = false;
        match result {
            Ok(product) => {
                self.selected_variant_id = Some(product.default_variant_id.clone());
                self.product = Some(product);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "product resolution failed");
                self.product = None;
                self.selected_variant_id = None;
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// User-facing message of the last failed resolution, if the current
    /// navigation failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        let product = self.product.as_ref()?;
        product.select_variant(self.selected_variant_id.as_deref().unwrap_or_default())
    }

    /// Re-selects by id, falling back to the first variant for a stale id.
    /// Switching to another variant drops its predecessor's texture state and
    /// leaves immersive mode.
    pub fn select_variant(&mut self, id: &str) -> Option<&ProductVariant> {
        let resolved = self.product.as_ref()?.select_variant(id)?.id.clone();
        if self.selected_variant_id.as_deref() != Some(resolved.as_str()) {
            self.texture = None;
            self.presenting = false;
        }
        self.selected_variant_id = Some(resolved);
        self.selected_variant()
    }

    /// Marks the selected variant's texture as loading and returns the job
    /// the caller should run. Any job issued earlier is superseded.
    pub fn begin_texture_preload(&mut self) -> Option<TexturePreloadJob> {
        let variant = self.selected_variant()?;
        let variant_id = variant.id.clone();
        let image_url = variant.image_url.clone();

        self.preload_generation += 1;
        let generation = self.preload_generation;
        self.texture = Some(TextureSlot {
            variant_id: variant_id.clone(),
            generation,
            state: TextureState::Loading,
        });
        Some(TexturePreloadJob {
            variant_id,
            image_url,
            generation,
        })
    }

    /// Records a preload outcome. Ignored (returns `false`) unless `job` is
    /// the check currently loading for the selected variant.
    pub fn commit_texture(
        &mut self,
        job: &TexturePreloadJob,
        result: Result<(), LoadError>,
    ) -> bool {
        let selected_id = self.selected_variant().map(|v| v.id.clone());
        let Some(slot) = self.texture.as_mut().filter(|slot| {
            slot.generation == job.generation
                && slot.state == TextureState::Loading
                && selected_id.as_deref() == Some(slot.variant_id.as_str())
        }) else {
            tracing::debug!(
                variant_id = %job.variant_id,
                "discarding superseded texture preload"
            );
            return false;
        };

        slot.state = match result {
            Ok(()) => TextureState::Ready,
            Err(e) => {
                tracing::warn!(variant_id = %job.variant_id, error = %e, "texture preload failed");
                TextureState::Failed(e.to_string())
            }
        };
        true
    }

    #[must_use]
    pub fn texture_state(&self) -> TextureState {
        match (&self.texture, self.selected_variant()) {
            (Some(slot), Some(v)) if slot.variant_id == v.id => slot.state.clone(),
            _ => TextureState::Idle,
        }
    }

    /// AR entry is allowed only once the selected texture is ready, so the
    /// immersive scene never opens blank.
    #[must_use]
    pub fn can_enter_ar(&self) -> bool {
        self.texture_state() == TextureState::Ready
    }

    /// Enters immersive mode if the gate allows it.
    pub fn enter_ar(&mut self) -> bool {
        self.presenting = self.can_enter_ar();
        self.presenting
    }

    pub fn exit_ar(&mut self) {
        self.presenting = false;
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    /// Placement of the selected variant under the current mode.
    #[must_use]
    pub fn placement(&self, calibration: &Calibration) -> Option<PlacementResult> {
        self.selected_variant()
            .map(|v| calibration.place(v, self.presenting))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
