pub mod app_config;
pub mod capabilities;
pub mod config;
pub mod placement;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use capabilities::{detect, Capabilities, ClientEnvironment, ForcedMode, ViewMode};
pub use config::{load_app_config, load_app_config_from_env};
pub use placement::{place, Calibration, PlacementResult, Vec3};
pub use products::{Orientation, Product, ProductVariant, INCHES_TO_METERS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
