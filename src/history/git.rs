//! Per-file history via `git log --follow`.

use super::{HistoryError, HistoryProvider};
use crate::{debug, utils::exec::Cmd};
use std::path::{Path, PathBuf};

/// Runs one `git log --follow` per queried file.
///
/// `TZ=UTC0` with `--date=iso-strict-local` makes git report every author
/// date in UTC.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
}

impl GitHistory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn command(&self, path: &str) -> Cmd {
        Cmd::new("git")
            .args([
                "log",
                "--follow",
                "--format=%ad",
                "--date=iso-strict-local",
                "--",
            ])
            .arg(path)
            .cwd(&self.root)
            .env("TZ", "UTC0")
    }
}

impl HistoryProvider for GitHistory {
    fn history(&self, path: &str) -> Result<Vec<String>, HistoryError> {
        let output = self.command(path).run()?;
        let stdout = String::from_utf8(output.stdout)?;
        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        debug!("git"; "{}: {} commit(s)", path, lines.iter().filter(|l| !l.trim().is_empty()).count());
        Ok(lines)
    }
}
