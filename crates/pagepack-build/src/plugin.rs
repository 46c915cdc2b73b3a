//! Trait definitions for build plugins.

use crate::compilation::Compilation;

/// Errors a plugin can report from its emit hook.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Plugin {plugin} failed: {message}")]
    Failed {
        plugin: &'static str,
        message: String,
    },

    #[error("Invalid asset {name}: {message}")]
    InvalidAsset { name: String, message: String },
}

/// Hook invoked once per build after the bundler's outputs are collected.
pub trait BuildPlugin: Send + Sync {
    /// Plugin identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Inspect and modify the compilation before it is written out.
    ///
    /// Returning `Ok(())` hands control back to the pipeline; an error aborts the build.
    fn emit(&self, compilation: &mut Compilation) -> Result<(), PluginError>;

    /// Asset names this plugin writes into the output directory.
    ///
    /// Files with these names left over from an earlier build are not collected as bundler output.
    fn outputs(&self) -> Vec<String> {
        Vec::new()
    }
}
