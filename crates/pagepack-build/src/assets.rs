//! Build assets produced during a single build pass.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Assets keyed by output-relative name, in insertion order.
pub type Assets = IndexMap<String, BuildAsset>;

/// A named output artifact of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildAsset {
    /// A file the bundler already wrote to the output directory
    Emitted {
        /// Location on disk
        path: PathBuf,
        /// File length at collection time
        len: u64,
    },

    /// Content generated by a plugin, written out at the end of the build
    Synthesized(String),
}

impl BuildAsset {
    /// Create an asset for a file already present on disk.
    pub fn emitted(path: impl Into<PathBuf>, len: u64) -> Self {
        BuildAsset::Emitted {
            path: path.into(),
            len,
        }
    }

    /// Create an in-memory asset.
    pub fn synthesized(content: impl Into<String>) -> Self {
        BuildAsset::Synthesized(content.into())
    }

    /// Size of the asset: the character count of synthesized content, the file length otherwise.
    pub fn size(&self) -> u64 {
        match self {
            BuildAsset::Emitted { len, .. } => *len,
            BuildAsset::Synthesized(content) => content.chars().count() as u64,
        }
    }

    /// In-memory content, if the asset was synthesized.
    pub fn content(&self) -> Option<&str> {
        match self {
            BuildAsset::Synthesized(content) => Some(content),
            BuildAsset::Emitted { .. } => None,
        }
    }
}

/// Convert a path relative to the output directory into an asset name.
///
/// Components are joined with `/` on every platform.
pub fn asset_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_size_is_content_length() {
        let asset = BuildAsset::synthesized("<html>\n</html>");
        assert_eq!(asset.size(), 14);
        assert_eq!(asset.content(), Some("<html>\n</html>"));
    }

    #[test]
    fn synthesized_size_counts_characters() {
        let asset = BuildAsset::synthesized("<script src='./app/ü.js'>");
        assert_eq!(asset.size(), 25);
    }

    #[test]
    fn emitted_size_is_recorded_length() {
        let asset = BuildAsset::emitted("dist/app/bundle.js", 1024);
        assert_eq!(asset.size(), 1024);
        assert!(asset.content().is_none());
    }

    #[test]
    fn asset_names_use_forward_slashes() {
        let relative: PathBuf = ["app", "chunks", "1.js"].iter().collect();
        assert_eq!(asset_name(&relative), "app/chunks/1.js");
    }

    #[test]
    fn assets_keep_insertion_order() {
        let mut assets = Assets::new();
        assets.insert("z.js".to_string(), BuildAsset::emitted("z.js", 1));
        assets.insert("a.js".to_string(), BuildAsset::emitted("a.js", 1));

        let names: Vec<_> = assets.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["z.js", "a.js"]);
    }
}
