//! Directory classification command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagepack_build::{collect_files, read_entries, Classification, Entry};

/// Run the classify command.
pub fn run(dir: &Path, recursive: bool, json: bool) -> Result<()> {
    let output = if recursive {
        let files = collect_files(dir)
            .with_context(|| format!("Failed to collect files under {}", dir.display()))?;
        render_files(&files, json)?
    } else {
        let entries =
            read_entries(dir).with_context(|| format!("Failed to classify {}", dir.display()))?;
        render_entries(entries, json)?
    };

    println!("{}", output);

    Ok(())
}

fn render_files(files: &[PathBuf], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(files)?);
    }

    Ok(files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Plain output lists entries in enumeration order; JSON groups them by kind.
fn render_entries(entries: Vec<Entry>, json: bool) -> Result<String> {
    if json {
        let classification: Classification = entries.into_iter().collect();
        return Ok(serde_json::to_string_pretty(&classification)?);
    }

    Ok(entries
        .iter()
        .map(|entry| {
            let kind = if entry.is_directory() { "dir " } else { "file" };
            format!("{} {}", kind, entry.path().display())
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::File(PathBuf::from("dist/index.html")),
            Entry::Directory(PathBuf::from("dist/app")),
        ]
    }

    #[test]
    fn renders_plain_listing_in_enumeration_order() {
        let text = render_entries(sample(), false).unwrap();
        assert_eq!(text, "file dist/index.html\ndir  dist/app");
    }

    #[test]
    fn renders_json_listing() {
        let text = render_entries(sample(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["files"][0], "dist/index.html");
        assert_eq!(value["directories"][0], "dist/app");
    }

    #[test]
    fn renders_recursive_files() {
        let files = vec![PathBuf::from("a.js"), PathBuf::from("app/b.js")];
        assert_eq!(render_files(&files, false).unwrap(), "a.js\napp/b.js");
    }
}
