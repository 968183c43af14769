use crate::app_config::{AppConfig, Environment};
use crate::placement::{Calibration, DEFAULT_PHYSICAL_CORRECTION, DEFAULT_PREVIEW_BOOST};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_factor = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a finite number greater than zero, got {value}"),
            });
        }
        Ok(value)
    };

    let content_endpoint = require("ARTVIEW_CONTENT_ENDPOINT")?;

    let env = parse_environment(&or_default("ARTVIEW_ENV", "development"))?;

    let bind_addr = parse_addr("ARTVIEW_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ARTVIEW_LOG_LEVEL", "info");
    let site_root = or_default("ARTVIEW_SITE_ROOT", "https://www.ikonhaus.art")
        .trim_end_matches('/')
        .to_string();

    let request_timeout_secs = parse_u64("ARTVIEW_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("ARTVIEW_USER_AGENT", "artview/0.1 (ar-previewer)");

    let calibration = Calibration {
        physical_correction: parse_factor(
            "ARTVIEW_PHYSICAL_CORRECTION",
            DEFAULT_PHYSICAL_CORRECTION,
        )?,
        preview_boost: parse_factor("ARTVIEW_PREVIEW_BOOST", DEFAULT_PREVIEW_BOOST)?,
    };

    let preload_concurrency = parse_usize("ARTVIEW_PRELOAD_CONCURRENCY", "4")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        content_endpoint,
        site_root,
        request_timeout_secs,
        user_agent,
        calibration,
        preload_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ARTVIEW_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
