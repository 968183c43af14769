//! Resolves a navigation selector (artwork slug and/or sku) to a [`Product`].

use artview_core::Product;

use crate::client::{ContentClient, RecordQuery};
use crate::error::LoadError;
use crate::normalize::{build_product, SiteLinks};
use crate::types::RawVariantRecord;

/// What the previewer was addressed by. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub slug: Option<String>,
    pub sku: Option<String>,
}

impl Selector {
    #[must_use]
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            sku: None,
        }
    }

    #[must_use]
    pub fn by_sku(sku: impl Into<String>) -> Self {
        Self {
            slug: None,
            sku: Some(sku.into()),
        }
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        non_blank(self.slug.as_deref())
    }

    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        non_blank(self.sku.as_deref())
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.slug(), self.sku()) {
            (Some(slug), Some(sku)) => write!(f, "artwork slug '{slug}' (sku '{sku}')"),
            (Some(slug), None) => write!(f, "artwork slug '{slug}'"),
            (None, Some(sku)) => write!(f, "sku '{sku}'"),
            (None, None) => write!(f, "no selector"),
        }
    }
}

/// Fetches and canonicalizes products from the content store.
#[derive(Debug, Clone)]
pub struct VariantResolver {
    client: ContentClient,
    links: SiteLinks,
}

impl VariantResolver {
    #[must_use]
    pub fn new(client: ContentClient, links: SiteLinks) -> Self {
        Self { client, links }
    }

    #[must_use]
    pub fn client(&self) -> &ContentClient {
        &self.client
    }

    /// Resolves `selector` to a freshly built product.
    ///
    /// With a slug this is one fetch; a sku given alongside it only picks the
    /// default variant. With a sku alone the first fetch discovers the
    /// artwork slug and a second fetch recovers the sibling variants, since a
    /// sku lookup may return a narrower set than the full product.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NoSelector`]: neither slug nor sku given.
    /// - [`LoadError::EmptyResult`]: the store returned no records.
    /// - any transport error from [`ContentClient::fetch_records`].
    pub async fn resolve_product(&self, selector: &Selector) -> Result<Product, LoadError> {
        let requested_sku = selector.sku();

        let records = match (selector.slug(), requested_sku) {
            (Some(slug), _) => {
                self.fetch_non_empty(&RecordQuery::ArtworkSlug(slug.to_owned()))
                    .await?
            }
            (None, Some(sku)) => self.fetch_by_sku_with_siblings(sku).await?,
            (None, None) => return Err(LoadError::NoSelector),
        };

        let product = build_product(records, requested_sku, &self.links)?;
        tracing::info!(
            slug = %product.id,
            variants = product.variant_count(),
            default_variant = %product.default_variant_id,
            "resolved product"
        );
        Ok(product)
    }

    async fn fetch_by_sku_with_siblings(
        &self,
        sku: &str,
    ) -> Result<Vec<RawVariantRecord>, LoadError> {
        let sku_records = self
            .fetch_non_empty(&RecordQuery::Sku(sku.to_owned()))
            .await?;

        let Some(slug) = sku_records
            .first()
            .and_then(|r| non_blank(r.artwork_slug.as_deref()))
            .map(str::to_owned)
        else {
            tracing::debug!(sku, "sku record names no artwork; using sku records only");
            return Ok(sku_records);
        };

        let siblings = self
            .client
            .fetch_records(&RecordQuery::ArtworkSlug(slug.clone()))
            .await?;

        if siblings.is_empty() {
            tracing::warn!(
                sku,
                slug = %slug,
                "sibling lookup returned no records; using sku records only"
            );
            return Ok(sku_records);
        }

        Ok(siblings)
    }

    async fn fetch_non_empty(
        &self,
        query: &RecordQuery,
    ) -> Result<Vec<RawVariantRecord>, LoadError> {
        let records = self.client.fetch_records(query).await?;
        if records.is_empty() {
            return Err(LoadError::EmptyResult {
                selector: query.to_string(),
            });
        }
        Ok(records)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
