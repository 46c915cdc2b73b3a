//! Configuration file structure (pagepack.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pagepack_build::VendorFile;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: String,
    /// Files copied from the vendor directory and loaded before the bundles
    #[serde(default)]
    pub vendor: Vec<VendorFile>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_output")]
    pub static_dir: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            vendor_dir: default_vendor_dir(),
            vendor: Vec::new(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            static_dir: default_output(),
        }
    }
}

fn default_output() -> String {
    "dist".to_string()
}
fn default_vendor_dir() -> String {
    "node_modules".to_string()
}
fn default_port() -> u16 {
    9000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}
