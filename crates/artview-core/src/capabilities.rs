//! Runtime capability detection for choosing between immersive AR and the
//! flat 3-D preview.
//!
//! Detection is a pure function of the ambient client environment. It never
//! fails: missing information degrades to the all-false default.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Query parameter that can pin the non-AR fallback.
pub const FORCE_MODE_PARAM: &str = "forceMode";

/// Value of [`FORCE_MODE_PARAM`] that forces the flat preview.
pub const FORCE_MODE_PREVIEW: &str = "3d";

const IOS_TOKENS: [&str; 3] = ["iPad", "iPhone", "iPod"];

/// What the client reported about itself at page load.
#[derive(Debug, Clone, Default)]
pub struct ClientEnvironment {
    pub user_agent: String,
    /// Browser vendor string, consulted only when `user_agent` is empty.
    pub vendor: Option<String>,
    /// Raw page query string, with or without the leading `?`.
    pub query: Option<String>,
    /// Whether the AR session-request capability object exists at all.
    pub xr_present: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForcedMode {
    #[default]
    Default,
    #[serde(rename = "3d")]
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Immersive,
    Preview,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    pub is_android: bool,
    pub ar_supported: bool,
    pub forced_mode: ForcedMode,
}

impl Capabilities {
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        if self.ar_supported {
            ViewMode::Immersive
        } else {
            ViewMode::Preview
        }
    }
}

/// Classifies the client environment.
///
/// A `forceMode=3d` query parameter overrides everything else and reports no
/// AR support. `None` (no interactive client) yields the default.
#[must_use]
pub fn detect(env: Option<&ClientEnvironment>) -> Capabilities {
    let Some(env) = env else {
        return Capabilities::default();
    };

    if env.query.as_deref().is_some_and(forces_preview) {
        return Capabilities {
            forced_mode: ForcedMode::Preview,
            ..Capabilities::default()
        };
    }

    let ua = if env.user_agent.is_empty() {
        env.vendor.as_deref().unwrap_or_default()
    } else {
        env.user_agent.as_str()
    };

    Capabilities {
        is_ios: IOS_TOKENS.iter().any(|token| ua.contains(token)),
        is_android: ua.to_ascii_lowercase().contains("android"),
        ar_supported: env.xr_present,
        forced_mode: ForcedMode::Default,
    }
}

/// Returns `true` when the first `forceMode` pair in `query` asks for the
/// flat preview.
fn forces_preview(query: &str) -> bool {
    query_param(query, FORCE_MODE_PARAM).is_some_and(|v| v == FORCE_MODE_PREVIEW)
}

/// Finds the first value for `name` in a URL query string, percent-decoded.
/// `+` is treated as a space, as in form encoding.
pub(crate) fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key) == name).then(|| decode(value))
        })
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
#[path = "capabilities_test.rs"]
mod tests;
