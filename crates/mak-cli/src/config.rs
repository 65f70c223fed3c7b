//! Loading the viewer configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mak_model::CatalogConfig;
use tracing::debug;

/// Read a JSON config file, or fall back to the built-in defaults.
///
/// Keys missing from the file keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    let Some(path) = path else {
        return Ok(CatalogConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let config: CatalogConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config: {}", path.display()))?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}
