//! Development server command.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pagepack_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the serve command.
pub async fn run(
    file_config: &ConfigFile,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let base_path = env::current_dir().context("Failed to resolve working directory")?;

    let config = DevServerConfig {
        base_path,
        static_dir: dir.unwrap_or_else(|| PathBuf::from(&file_config.server.static_dir)),
        port: port.unwrap_or(file_config.server.port),
        host: file_config.server.host.clone(),
        open,
    };

    DevServer::new(config).start().await?;

    Ok(())
}
