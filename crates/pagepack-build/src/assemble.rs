//! Entry page assembly: one `<script>` tag per emitted bundle.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::{Assets, BuildAsset};
use crate::compilation::Compilation;
use crate::html::{simple_tag, to_tag};
use crate::plugin::{BuildPlugin, PluginError};

/// Name of the synthesized entry page.
pub const INDEX_HTML: &str = "index.html";

/// Substrings that mark an asset as a source map or test artifact.
const EXCLUDED_SUBSTRINGS: &[&str] = &["test", "map"];

/// A third-party file copied into the output and loaded before the bundles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VendorFile {
    /// Path relative to the vendor directory
    pub source: String,

    /// Asset name inside the output directory
    pub destination: String,
}

/// Whether an asset name is dropped from the page.
///
/// Plain substring match, so `sitemap.js` and `contest.js` are dropped too.
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_SUBSTRINGS.iter().any(|s| name.contains(s))
}

/// Vendor names followed by asset names, minus excluded entries.
pub fn script_files<'a, V, A>(vendor: V, assets: A) -> Vec<String>
where
    V: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = &'a str>,
{
    vendor
        .into_iter()
        .chain(assets)
        .filter(|name| !is_excluded(name))
        .map(str::to_string)
        .collect()
}

/// Render the entry page for the given script files, in order.
pub fn render_html(files: &[String]) -> String {
    let scripts = files
        .iter()
        .map(|file| {
            let src = format!("./{}", file);
            to_tag(
                "script",
                &[("src", src.as_str()), ("type", "application/javascript")],
                "",
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = [to_tag("div", &[("id", "app")], ""), scripts].join("\n");

    simple_tag(
        "html",
        &[simple_tag("head", ""), simple_tag("body", &body)].join("\n"),
    )
}

/// Render the entry page for `assets` and insert it as `index.html`.
///
/// Returns the rendered document.
pub fn assemble(assets: &mut Assets, vendor_files: &[String]) -> String {
    let files = script_files(
        vendor_files.iter().map(String::as_str),
        assets.keys().map(String::as_str),
    );

    let rendered = render_html(&files);

    tracing::debug!("Rendered {} with {} scripts", INDEX_HTML, files.len());

    assets.insert(
        INDEX_HTML.to_string(),
        BuildAsset::synthesized(rendered.clone()),
    );

    rendered
}

/// Plugin that writes the `index.html` entry page and copies vendor files.
#[derive(Debug, Clone)]
pub struct HtmlPlugin {
    vendor_dir: PathBuf,
    vendor_files: Vec<VendorFile>,
}

impl HtmlPlugin {
    /// Create a plugin with no vendor files.
    pub fn new(vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            vendor_dir: vendor_dir.into(),
            vendor_files: Vec::new(),
        }
    }

    /// Set the vendor files loaded ahead of the bundles.
    pub fn with_vendor_files(mut self, vendor_files: Vec<VendorFile>) -> Self {
        self.vendor_files = vendor_files;
        self
    }

    pub fn vendor_files(&self) -> &[VendorFile] {
        &self.vendor_files
    }
}

impl Default for HtmlPlugin {
    fn default() -> Self {
        Self::new("node_modules")
    }
}

impl BuildPlugin for HtmlPlugin {
    fn name(&self) -> &'static str {
        "html"
    }

    fn emit(&self, compilation: &mut Compilation) -> Result<(), PluginError> {
        for vendor in &self.vendor_files {
            let destination = Path::new(&vendor.destination);
            if vendor.destination.is_empty() || destination.is_absolute() {
                return Err(PluginError::InvalidAsset {
                    name: vendor.destination.clone(),
                    message: "vendor destination must be a relative path".to_string(),
                });
            }

            compilation.schedule_copy(self.vendor_dir.join(&vendor.source), destination);
        }

        let vendor_names: Vec<String> = self
            .vendor_files
            .iter()
            .map(|v| v.destination.clone())
            .collect();

        let rendered = assemble(compilation.assets_mut(), &vendor_names);

        tracing::info!("Generated {} ({} characters)", INDEX_HTML, rendered.chars().count());

        Ok(())
    }

    fn outputs(&self) -> Vec<String> {
        std::iter::once(INDEX_HTML.to_string())
            .chain(self.vendor_files.iter().map(|v| v.destination.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn assets_named(names: &[&str]) -> Assets {
        names
            .iter()
            .map(|n| (n.to_string(), BuildAsset::emitted(format!("dist/{}", n), 1)))
            .collect()
    }

    #[test]
    fn drops_map_and_test_artifacts() {
        let mut assets = assets_named(&["app/bundle.js", "app/bundle.js.map", "app/test.spec.js"]);

        let html = assemble(&mut assets, &[]);

        assert_eq!(html.matches("<script").count(), 1);
        assert!(html.contains("<script src='./app/bundle.js' type='application/javascript'>"));
    }

    #[test]
    fn renders_empty_document() {
        let mut assets = Assets::new();

        let html = assemble(&mut assets, &[]);

        assert_eq!(
            html,
            "<html>\n<head>\n\n</head>\n<body>\n<div id='app'>\n\n</div>\n\n</body>\n</html>"
        );
        assert!(!html.contains("<script"));
    }

    #[test]
    fn renders_scripts_after_app_anchor() {
        let html = render_html(&["a.js".to_string(), "b.js".to_string()]);

        assert_eq!(
            html,
            "<html>\n<head>\n\n</head>\n<body>\n<div id='app'>\n\n</div>\n\
             <script src='./a.js' type='application/javascript'>\n\n</script>\n\
             <script src='./b.js' type='application/javascript'>\n\n</script>\n</body>\n</html>"
        );
    }

    #[test]
    fn keeps_emission_order() {
        let mut assets = assets_named(&["z/main.js", "a/vendor.js", "m/runtime.js"]);

        let html = assemble(&mut assets, &[]);

        let z = html.find("z/main.js").unwrap();
        let a = html.find("a/vendor.js").unwrap();
        let m = html.find("m/runtime.js").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn vendor_files_come_first() {
        let mut assets = assets_named(&["app/bundle.js"]);

        let html = assemble(&mut assets, &["react.js".to_string()]);

        assert!(html.find("./react.js").unwrap() < html.find("./app/bundle.js").unwrap());
    }

    #[test]
    fn substring_match_drops_unrelated_names() {
        assert!(is_excluded("sitemap.js"));
        assert!(is_excluded("contest/app.js"));
        assert!(!is_excluded("app/bundle.js"));
    }

    #[test]
    fn inserts_index_with_exact_size() {
        let mut assets = assets_named(&["app/bundle.js", "app/ü.js"]);

        let html = assemble(&mut assets, &[]);

        let index = &assets[INDEX_HTML];
        assert_eq!(index.content(), Some(html.as_str()));
        assert_eq!(index.size(), html.chars().count() as u64);
        assert_eq!(index.size() + 1, html.len() as u64);
    }

    #[test]
    fn plugin_schedules_vendor_copies() {
        let plugin = HtmlPlugin::new("node_modules").with_vendor_files(vec![VendorFile {
            source: "react/umd/react.development.js".to_string(),
            destination: "react.js".to_string(),
        }]);
        let mut compilation = Compilation::new("dist");

        plugin.emit(&mut compilation).unwrap();

        let copy = &compilation.copies()[0];
        assert_eq!(
            copy.source,
            Path::new("node_modules").join("react/umd/react.development.js")
        );
        assert_eq!(copy.destination, Path::new("dist").join("react.js"));
        let index = compilation.assets()[INDEX_HTML].content().unwrap();
        assert!(index.contains("./react.js"));
    }

    #[test]
    fn plugin_claims_index_and_vendor_destinations() {
        let plugin = HtmlPlugin::default().with_vendor_files(vec![VendorFile {
            source: "react/umd/react.development.js".to_string(),
            destination: "vendor/react.js".to_string(),
        }]);

        assert_eq!(
            plugin.outputs(),
            vec![INDEX_HTML.to_string(), "vendor/react.js".to_string()]
        );
    }

    #[test]
    fn plugin_rejects_absolute_vendor_destination() {
        let plugin = HtmlPlugin::default().with_vendor_files(vec![VendorFile {
            source: "lib.js".to_string(),
            destination: "/etc/lib.js".to_string(),
        }]);
        let mut compilation = Compilation::new("dist");

        let err = plugin.emit(&mut compilation).unwrap_err();

        assert!(matches!(err, PluginError::InvalidAsset { .. }));
    }

    proptest! {
        #[test]
        fn never_renders_excluded_names(names in prop::collection::vec("[a-z/.]{1,12}", 0..12)) {
            let files = script_files([], names.iter().map(String::as_str));
            for file in &files {
                prop_assert!(!file.contains("test") && !file.contains("map"));
            }
        }

        #[test]
        fn filtering_is_idempotent(names in prop::collection::vec("[a-z/.]{1,12}", 0..12)) {
            let once = script_files([], names.iter().map(String::as_str));
            let twice = script_files([], once.iter().map(String::as_str));
            prop_assert_eq!(once, twice);
        }
    }
}
