use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config root, relative to the working directory. `None` uses the working directory itself.
    pub config_dir: Option<PathBuf>,
    /// Sub-directory of the config root holding device documents.
    pub device_config_type: String,
    /// Sub-directory holding optional per-device patch documents.
    pub patch_config_type: String,
    pub app_title: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            config_dir: non_empty("CONFIG_DIR").map(PathBuf::from),
            device_config_type: non_empty("DEVICE_CONFIG_TYPE")
                .unwrap_or_else(|| "devices".to_string()),
            patch_config_type: non_empty("PATCH_CONFIG_TYPE")
                .unwrap_or_else(|| "patches".to_string()),
            app_title: non_empty("APP_TITLE").unwrap_or_else(|| "TV Application".to_string()),
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
