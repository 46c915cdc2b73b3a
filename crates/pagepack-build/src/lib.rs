//! Output classification and entry-page assembly for bundled sites.
//!
//! Picks up a bundler's output directory, registers every emitted file as an
//! asset, runs build plugins over the collection, and writes what they produce.

pub mod assemble;
pub mod assets;
pub mod builder;
pub mod classify;
pub mod compilation;
pub mod html;
pub mod plugin;

pub use assemble::{assemble, render_html, HtmlPlugin, VendorFile, INDEX_HTML};
pub use assets::{Assets, BuildAsset};
pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use classify::{classify, collect_files, read_entries, Classification, ClassifyError, Entry};
pub use compilation::{Compilation, CopyRequest};
pub use plugin::{BuildPlugin, PluginError};
