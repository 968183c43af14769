use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no product selector: provide an artwork slug or a sku")]
    NoSelector,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid content endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("no variants found for {selector}")]
    EmptyResult { selector: String },

    #[error("texture preload failed for {url}: {reason}")]
    TexturePreload { url: String, reason: String },
}

impl LoadError {
    /// `true` for failures of the round trip itself rather than of its
    /// content: network errors, non-2xx statuses, unreadable bodies and
    /// unusable endpoints.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoadError::Http(_)
                | LoadError::UnexpectedStatus { .. }
                | LoadError::Deserialize { .. }
                | LoadError::InvalidEndpoint { .. }
        )
    }
}
