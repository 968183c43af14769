//! Texture preloading used to gate AR entry.

use futures::stream::{self, StreamExt};

use artview_core::ProductVariant;

use crate::error::LoadError;

use super::ContentClient;

impl ContentClient {
    /// Downloads the image at `url` and confirms it is usable as a texture.
    ///
    /// A texture is ready when the response is 2xx, the body is non-empty and
    /// any `Content-Type` header names an image.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TexturePreload`] for an empty URL, a network
    /// failure, a non-2xx status, a non-image content type or an empty body.
    pub async fn preload_texture(&self, url: &str) -> Result<(), LoadError> {
        let fail = |reason: String| LoadError::TexturePreload {
            url: url.to_owned(),
            reason,
        };

        if url.is_empty() {
            return Err(fail("variant has no resolved image".to_owned()));
        }

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP status {}", status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(ct) = content_type.as_deref() {
            if !ct.starts_with("image/") {
                return Err(fail(format!("content type '{ct}' is not an image")));
            }
        }

        let body = response.bytes().await.map_err(|e| fail(e.to_string()))?;
        if body.is_empty() {
            return Err(fail("empty image body".to_owned()));
        }

        tracing::debug!(url, bytes = body.len(), "texture preloaded");
        Ok(())
    }

    /// Preloads every variant's texture with at most `concurrency` requests in
    /// flight. Results are returned in variant order.
    pub async fn preload_variants<'a>(
        &self,
        variants: &'a [ProductVariant],
        concurrency: usize,
    ) -> Vec<(&'a ProductVariant, Result<(), LoadError>)> {
        stream::iter(variants.iter().map(|variant| async move {
            let result = self.preload_texture(&variant.image_url).await;
            (variant, result)
        }))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
    }
}
