//! Directory scanning for article files.

use crate::debug;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list directory `{}`", .0.display())]
    ReadDir(PathBuf, #[source] io::Error),
}

/// Which file names in a directory are articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRule {
    /// Extension without the leading dot.
    pub extension: &'static str,
    /// Exact names that carry the extension but are not articles.
    pub excluded: &'static [&'static str],
}

impl ScanRule {
    pub const fn new(extension: &'static str, excluded: &'static [&'static str]) -> Self {
        Self {
            extension,
            excluded,
        }
    }

    /// Check whether `name` is an article file name.
    pub fn matches(&self, name: &str) -> bool {
        let has_extension = name
            .strip_suffix(self.extension)
            .is_some_and(|stem| stem.ends_with('.'));
        has_extension && !self.excluded.contains(&name)
    }
}

/// List article file names in `dir`, in directory listing order.
///
/// Entries that are not regular files, or whose names are not UTF-8, are
/// skipped. Any I/O error while listing is returned.
pub fn scan(dir: &Path, rule: &ScanRule) -> Result<Vec<String>, ScanError> {
    let read_dir = |err| ScanError::ReadDir(dir.to_path_buf(), err);

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        let Ok(name) = entry.file_name().into_string() else {
            debug!("scan"; "skipping non UTF-8 name {:?}", entry.file_name());
            continue;
        };
        if !rule.matches(&name) {
            continue;
        }
        if !entry.path().is_file() {
            debug!("scan"; "skipping {}: not a regular file", name);
            continue;
        }
        names.push(name);
    }

    debug!("scan"; "{} article(s) in {}", names.len(), dir.display());
    Ok(names)
}
