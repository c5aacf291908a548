//! Loads an `EngineConfig` from an optional TOML file, clamps it, and
//! surfaces any clamping warnings for the caller to log.

use std::path::Path;

use anyhow::{Context, Result};
use pf_core::EngineConfig;

pub fn load(path: Option<&Path>) -> Result<(EngineConfig, Vec<String>)> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let warnings = config.validate();
    Ok((config, warnings))
}
