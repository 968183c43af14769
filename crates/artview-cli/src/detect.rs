//! `detect` command handler.

use artview_core::{detect, ClientEnvironment};

/// Classify the given client environment and print the result as JSON,
/// together with the view mode it selects.
pub(crate) fn run_detect(
    user_agent: String,
    vendor: Option<String>,
    query: Option<String>,
    xr: bool,
) -> anyhow::Result<()> {
    let env = ClientEnvironment {
        user_agent,
        vendor,
        query,
        xr_present: xr,
    };
    let capabilities = detect(Some(&env));

    let mut value = serde_json::to_value(capabilities)?;
    value["viewMode"] = serde_json::to_value(capabilities.view_mode())?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
