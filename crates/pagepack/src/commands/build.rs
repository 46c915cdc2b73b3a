//! Entry-page build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pagepack_build::{BuildConfig, SiteBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(file_config: &ConfigFile, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building entry page...");

    let config = BuildConfig {
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.build.output)),
        vendor_dir: PathBuf::from(&file_config.build.vendor_dir),
        vendor_files: file_config.build.vendor.clone(),
    };

    let result = SiteBuilder::new(config)
        .build()
        .await
        .context("Build failed")?;

    tracing::info!(
        "Processed {} assets, wrote {} and copied {} files in {}ms",
        result.assets,
        result.written,
        result.copied,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
