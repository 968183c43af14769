use std::net::SocketAddr;

use crate::placement::Calibration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Content-store endpoint queried with `?artworkSlug=` or `?sku=`.
    pub content_endpoint: String,
    /// Commerce site root used for detail-page and add-to-cart links.
    pub site_root: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Placement calibration; see [`Calibration`].
    pub calibration: Calibration,
    /// Maximum number of image checks in flight during bulk verification.
    pub preload_concurrency: usize,
}
