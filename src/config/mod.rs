// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

pub const ENV_PREFIX: &str = "LOGANALYZER";

/// Load runtime settings from an optional file (YAML, JSON or TOML by
/// extension) overlaid with `LOGANALYZER_*` environment variables.
pub fn load_settings<P: AsRef<Path>>(path: Option<P>) -> Result<Settings> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = path {
        let path = path.as_ref();
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    let settings: Settings = builder
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Failed to parse settings")?;

    settings.validate()?;
    Ok(settings)
}
