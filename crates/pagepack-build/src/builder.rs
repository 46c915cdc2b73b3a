//! Site builder: collects bundler output, runs plugins, writes results.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::assemble::{HtmlPlugin, VendorFile};
use crate::assets::{asset_name, BuildAsset};
use crate::classify::{collect_files, ClassifyError};
use crate::compilation::Compilation;
use crate::plugin::{BuildPlugin, PluginError};

/// Configuration for a build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory the bundler emitted into
    pub output_dir: PathBuf,

    /// Directory vendor files are copied from
    pub vendor_dir: PathBuf,

    /// Vendor files loaded ahead of the bundles
    pub vendor_files: Vec<VendorFile>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            vendor_dir: PathBuf::from("node_modules"),
            vendor_files: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of assets collected from the output directory
    pub assets: usize,

    /// Number of synthesized assets written
    pub written: usize,

    /// Number of vendor files copied
    pub copied: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Output directory not found: {0}")]
    OutputMissing(PathBuf),

    #[error("Failed to collect outputs: {0}")]
    Collect(#[from] ClassifyError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error("Failed to copy {source_path} to {destination}: {source}")]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    plugins: Vec<Box<dyn BuildPlugin>>,
}

impl SiteBuilder {
    /// Create a builder with the HTML plugin registered.
    pub fn new(config: BuildConfig) -> Self {
        let html =
            HtmlPlugin::new(&config.vendor_dir).with_vendor_files(config.vendor_files.clone());

        Self {
            config,
            plugins: vec![Box::new(html)],
        }
    }

    /// Create a builder with no plugins registered.
    pub fn bare(config: BuildConfig) -> Self {
        Self {
            config,
            plugins: Vec::new(),
        }
    }

    /// Register an additional plugin. Plugins run in registration order.
    pub fn with_plugin(mut self, plugin: impl BuildPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let owned: HashSet<String> = self.plugins.iter().flat_map(|p| p.outputs()).collect();

        let mut compilation = self.collect_outputs(&owned)?;
        let assets = compilation.assets().len();

        for plugin in &self.plugins {
            tracing::debug!("Running plugin {}", plugin.name());
            plugin.emit(&mut compilation)?;
        }

        let copied = self.copy_scheduled(&compilation).await?;
        let written = self.write_synthesized(&compilation)?;

        Ok(BuildResult {
            assets,
            written,
            copied,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Register every file in the output directory as an emitted asset.
    ///
    /// Names in `owned` are written by plugins, so copies left by an earlier build are skipped.
    fn collect_outputs(&self, owned: &HashSet<String>) -> Result<Compilation, BuildError> {
        let output_dir = &self.config.output_dir;

        if !output_dir.is_dir() {
            return Err(BuildError::OutputMissing(output_dir.clone()));
        }

        let mut compilation = Compilation::new(output_dir);

        for path in collect_files(output_dir)? {
            let relative = path.strip_prefix(output_dir).unwrap_or(&path);
            let name = asset_name(relative);

            if owned.contains(&name) {
                tracing::debug!("Skipping {} left by a previous build", name);
                continue;
            }

            let len = fs::metadata(&path)
                .map_err(|source| ClassifyError::Io {
                    path: path.clone(),
                    source,
                })?
                .len();

            compilation.insert_asset(name, BuildAsset::emitted(path, len));
        }

        tracing::info!(
            "Collected {} assets from {}",
            compilation.assets().len(),
            output_dir.display()
        );

        Ok(compilation)
    }

    /// Perform copies scheduled by plugins. The first failure aborts the build.
    async fn copy_scheduled(&self, compilation: &Compilation) -> Result<usize, BuildError> {
        for request in compilation.copies() {
            let copy_error = |source| BuildError::Copy {
                source_path: request.source.clone(),
                destination: request.destination.clone(),
                source,
            };

            if let Some(parent) = request.destination.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(copy_error)?;
            }

            tokio::fs::copy(&request.source, &request.destination)
                .await
                .map_err(copy_error)?;

            tracing::info!(
                "Copied file {} into {}",
                request.source.display(),
                request.destination.display()
            );
        }

        Ok(compilation.copies().len())
    }

    /// Write in-memory assets to the output directory.
    fn write_synthesized(&self, compilation: &Compilation) -> Result<usize, BuildError> {
        let mut written = 0;

        for (name, asset) in compilation.assets() {
            let Some(content) = asset.content() else {
                continue;
            };

            let path = compilation.output_dir().join(name);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            fs::write(&path, content).map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;

            tracing::debug!("Wrote {} ({} characters)", path.display(), asset.size());
            written += 1;
        }

        Ok(written)
    }
}
