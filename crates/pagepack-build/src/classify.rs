//! Directory enumeration and file/directory classification.
//!
//! Entries are queried without following symlinks. Anything that is not a
//! regular file or a directory is rejected rather than silently skipped.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// A classified directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum Entry {
    /// A regular file
    File(PathBuf),

    /// A directory
    Directory(PathBuf),
}

impl Entry {
    /// Path of the entry, regardless of kind.
    pub fn path(&self) -> &Path {
        match self {
            Entry::File(path) | Entry::Directory(path) => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }
}

/// Direct children of a directory, split by kind.
///
/// Both lists keep the order in which the filesystem yielded the entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Regular files
    pub files: Vec<PathBuf>,

    /// Sub-directories
    pub directories: Vec<PathBuf>,
}

impl Classification {
    /// Total number of classified entries.
    pub fn len(&self) -> usize {
        self.files.len() + self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

impl FromIterator<Entry> for Classification {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut result = Classification::default();
        for entry in iter {
            match entry {
                Entry::File(path) => result.files.push(path),
                Entry::Directory(path) => result.directories.push(path),
            }
        }
        result
    }
}

/// Errors that can occur while classifying a directory.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Unsupported entry type ({kind}): {path}")]
    UnsupportedEntry { path: PathBuf, kind: &'static str },
}

/// List and classify the direct children of `root`.
pub fn read_entries(root: &Path) -> Result<Vec<Entry>, ClassifyError> {
    // walkdir reports a missing root lazily; stat it up front so the error names the root.
    let meta = std::fs::symlink_metadata(root).map_err(|source| ClassifyError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ClassifyError::UnsupportedEntry {
            path: root.to_path_buf(),
            kind: kind_name(&meta.file_type()),
        });
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry?;
        let file_type = entry.file_type();

        let classified = if file_type.is_file() {
            Entry::File(entry.into_path())
        } else if file_type.is_dir() {
            Entry::Directory(entry.into_path())
        } else {
            return Err(ClassifyError::UnsupportedEntry {
                path: entry.into_path(),
                kind: kind_name(&file_type),
            });
        };

        entries.push(classified);
    }

    Ok(entries)
}

/// Partition the direct children of `root` into files and directories.
pub fn classify(root: &Path) -> Result<Classification, ClassifyError> {
    let classification: Classification = read_entries(root)?.into_iter().collect();

    tracing::debug!(
        "Classified {}: {} files, {} directories",
        root.display(),
        classification.files.len(),
        classification.directories.len()
    );

    Ok(classification)
}

/// Collect every file beneath `root`.
///
/// Directories are pushed onto a worklist and drained until none remain.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, ClassifyError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Classification {
            files: found,
            directories,
        } = classify(&dir)?;

        files.extend(found);
        pending.extend(directories);
    }

    Ok(files)
}

fn kind_name(file_type: &std::fs::FileType) -> &'static str {
    if file_type.is_symlink() {
        return "symlink";
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;

        if file_type.is_fifo() {
            return "fifo";
        }
        if file_type.is_socket() {
            return "socket";
        }
        if file_type.is_block_device() || file_type.is_char_device() {
            return "device";
        }
    }

    if file_type.is_file() {
        "file"
    } else {
        "other"
    }
}
