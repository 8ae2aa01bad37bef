pub mod config;
pub mod info;
pub mod line;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use sunslice_core::pipeline::config::SliceConfig;

/// Read a TOML slice config, resolving frame paths against its directory.
pub fn read_config(path: &Path) -> Result<SliceConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SliceConfig = toml::from_str(&contents).context("Invalid slice config")?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.with_base_dir(base))
}
