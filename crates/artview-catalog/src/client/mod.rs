//! HTTP client for the content store's variant collection endpoint.

mod preload;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::LoadError;
use crate::types::{RawVariantRecord, VariantRecordsResponse};

/// Query parameter selecting records by artwork slug.
pub const ARTWORK_SLUG_PARAM: &str = "artworkSlug";

/// Query parameter selecting records by sku.
pub const SKU_PARAM: &str = "sku";

/// One lookup against the variant collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordQuery {
    ArtworkSlug(String),
    Sku(String),
}

impl RecordQuery {
    fn param(&self) -> (&'static str, &str) {
        match self {
            RecordQuery::ArtworkSlug(slug) => (ARTWORK_SLUG_PARAM, slug),
            RecordQuery::Sku(sku) => (SKU_PARAM, sku),
        }
    }
}

impl std::fmt::Display for RecordQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordQuery::ArtworkSlug(slug) => write!(f, "artwork slug '{slug}'"),
            RecordQuery::Sku(sku) => write!(f, "sku '{sku}'"),
        }
    }
}

/// HTTP client for the variant collection endpoint.
///
/// Non-2xx responses surface as [`LoadError::UnexpectedStatus`]. Nothing is
/// retried: a failed fetch is terminal for that attempt.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    endpoint: Url,
}

impl ContentClient {
    /// Creates a `ContentClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute URL, or [`LoadError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LoadError> {
        let endpoint_url = Url::parse(endpoint.trim()).map_err(|e| LoadError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(LoadError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: format!("unsupported scheme '{}'", endpoint_url.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint_url,
        })
    }

    /// Fetches all records matching `query`.
    ///
    /// An empty `items` array is returned as an empty `Vec`; deciding whether
    /// that is an error is the caller's job.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Http`]: network or TLS failure.
    /// - [`LoadError::UnexpectedStatus`]: any non-2xx status.
    /// - [`LoadError::Deserialize`]: body is not the expected JSON shape.
    pub async fn fetch_records(
        &self,
        query: &RecordQuery,
    ) -> Result<Vec<RawVariantRecord>, LoadError> {
        let url = self.records_url(query);
        tracing::debug!(%url, "fetching variant records");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoadError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<VariantRecordsResponse>(&body).map_err(|e| {
            LoadError::Deserialize {
                context: format!("variant records for {query}"),
                source: e,
            }
        })?;

        tracing::debug!(%query, count = parsed.items.len(), "fetched variant records");
        Ok(parsed.items)
    }

    /// Builds the lookup URL, appending the selector to any query the
    /// configured endpoint already carries.
    fn records_url(&self, query: &RecordQuery) -> Url {
        let mut url = self.endpoint.clone();
        let (key, value) = query.param();
        url.query_pairs_mut().append_pair(key, value);
        url
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
