//! Mutable state of a single build pass.

use std::path::{Path, PathBuf};

use crate::assets::{Assets, BuildAsset};

/// A file copy scheduled by a plugin, performed after all plugins ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// Absolute or working-directory-relative source file
    pub source: PathBuf,

    /// Destination inside the output directory
    pub destination: PathBuf,
}

/// Assets and side effects collected for one build.
#[derive(Debug)]
pub struct Compilation {
    output_dir: PathBuf,
    assets: Assets,
    copies: Vec<CopyRequest>,
}

impl Compilation {
    /// Create an empty compilation writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            assets: Assets::new(),
            copies: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    /// Insert or replace an asset. Replacing keeps the original position.
    pub fn insert_asset(&mut self, name: impl Into<String>, asset: BuildAsset) {
        self.assets.insert(name.into(), asset);
    }

    /// Schedule a copy into the output directory.
    pub fn schedule_copy(&mut self, source: impl Into<PathBuf>, destination: impl AsRef<Path>) {
        let destination = self.output_dir.join(destination);
        self.copies.push(CopyRequest {
            source: source.into(),
            destination,
        });
    }

    pub fn copies(&self) -> &[CopyRequest] {
        &self.copies
    }
}
