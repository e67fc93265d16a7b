//! CLI configuration utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use videoflix_core::ValidateConfig;
use videoflix_http::ClientConfig;

const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory
///
/// Order: `--data-dir`, `VIDEOFLIX_STATE_DIR`, then the platform data dir.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        if let Ok(dir) = std::env::var("VIDEOFLIX_STATE_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("videoflix")
        }
    })
}

/// Load client configuration
///
/// An explicit `--config` file must exist; otherwise `config.toml` in the
/// data directory is used when present. Environment variables override file
/// values and `--base-url` overrides both.
pub fn load_client_config(
    explicit: Option<&Path>,
    data_dir: &Path,
    base_url: Option<String>,
) -> Result<ClientConfig> {
    let default_path = data_dir.join(CONFIG_FILE);
    let path = match explicit {
        Some(path) => Some(path),
        None if default_path.exists() => Some(default_path.as_path()),
        None => None,
    };

    let mut config = match path {
        Some(path) => ClientConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("Failed to load config from environment")?,
    };

    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    Ok(config)
}
