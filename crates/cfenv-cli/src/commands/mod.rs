//! Command implementations for cfenv-cli

pub mod app;
pub mod services;
pub mod show;
pub mod url;

use std::path::Path;

use cfenv_core::AppEnvOptions;

use crate::error::Result;

pub use app::run_app;
pub use services::{run_creds, run_service, run_services};
pub use show::run_show;
pub use url::run_url;

/// Load construction options from a JSON file.
pub fn load_options(path: &Path) -> Result<AppEnvOptions> {
    tracing::debug!(path = %path.display(), "Loading options");
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(AppEnvOptions::from_json(&value)?)
}
