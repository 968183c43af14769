use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert(
        "ARTVIEW_CONTENT_ENDPOINT",
        "https://cms.example.com/_functions/variants",
    );
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ARTVIEW_ENV"));
}

#[test]
fn build_app_config_fails_without_content_endpoint() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ARTVIEW_CONTENT_ENDPOINT"),
        "expected MissingEnvVar(ARTVIEW_CONTENT_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_content_endpoint_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ARTVIEW_CONTENT_ENDPOINT", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("ARTVIEW_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ARTVIEW_BIND_ADDR"),
        "expected InvalidEnvVar(ARTVIEW_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.content_endpoint,
        "https://cms.example.com/_functions/variants"
    );
    assert_eq!(cfg.site_root, "https://www.ikonhaus.art");
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.user_agent, "artview/0.1 (ar-previewer)");
    assert_eq!(cfg.calibration, Calibration::default());
    assert_eq!(cfg.preload_concurrency, 4);
}

#[test]
fn site_root_trailing_slash_is_trimmed() {
    let mut map = full_env();
    map.insert("ARTVIEW_SITE_ROOT", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.site_root, "https://shop.example.com");
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("ARTVIEW_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("ARTVIEW_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ARTVIEW_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ARTVIEW_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn calibration_overrides_are_applied() {
    let mut map = full_env();
    map.insert("ARTVIEW_PHYSICAL_CORRECTION", "1.31");
    map.insert("ARTVIEW_PREVIEW_BOOST", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.calibration.physical_correction - 1.31).abs() < f64::EPSILON);
    assert!((cfg.calibration.preview_boost - 3.0).abs() < f64::EPSILON);
}

#[test]
fn calibration_rejects_non_numeric() {
    let mut map = full_env();
    map.insert("ARTVIEW_PHYSICAL_CORRECTION", "big");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ARTVIEW_PHYSICAL_CORRECTION"),
        "expected InvalidEnvVar(ARTVIEW_PHYSICAL_CORRECTION), got: {result:?}"
    );
}

#[test]
fn calibration_rejects_zero_and_negative() {
    for raw in ["0", "-1.5", "NaN", "inf"] {
        let mut map = full_env();
        map.insert("ARTVIEW_PREVIEW_BOOST", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ARTVIEW_PREVIEW_BOOST"),
            "expected InvalidEnvVar(ARTVIEW_PREVIEW_BOOST) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn preload_concurrency_invalid() {
    let mut map = full_env();
    map.insert("ARTVIEW_PRELOAD_CONCURRENCY", "-2");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ARTVIEW_PRELOAD_CONCURRENCY"
    ));
}
