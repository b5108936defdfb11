pub mod model;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, DisplayConfig, IrcConfig, RelayConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fallblatt-relay")
        .join("config.toml")
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the per-user config file is
/// read if present, otherwise built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file {} does not exist", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = config_path();
            if !p.exists() {
                return Ok(AppConfig::default());
            }
            p
        }
    };
    read_config(&path)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
