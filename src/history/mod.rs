//! Commit history lookup for history-dated articles.
//!
//! A [`HistoryProvider`] answers one question: when was this file changed,
//! newest first. The git-backed providers shell out to `git log`; tests use
//! in-memory fakes.

mod bulk;
mod git;

pub use bulk::BulkGitHistory;
pub use git::GitHistory;

use crate::utils::{date::DateTimeUtc, exec::ExecError};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("git output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("unexpected git log line {line}: `{text}`")]
    Parse { line: usize, text: String },
}

/// Source of commit timestamps for a file.
pub trait HistoryProvider {
    /// RFC 3339 commit timestamps touching `path` (relative to the scanned
    /// directory), newest first. Blank lines may be present.
    fn history(&self, path: &str) -> Result<Vec<String>, HistoryError>;
}

impl<T: HistoryProvider + ?Sized> HistoryProvider for &T {
    fn history(&self, path: &str) -> Result<Vec<String>, HistoryError> {
        (**self).history(path)
    }
}

/// `updated` and `published` timestamps of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamps {
    pub updated: String,
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("history is empty")]
    Empty,

    #[error("`{0}` is not an RFC 3339 timestamp")]
    Invalid(String),
}

impl Timestamps {
    /// Newest line becomes `updated`, the last non-empty line `published`.
    ///
    /// Lines are emitted as reported once they validate as RFC 3339.
    pub fn from_history<S: AsRef<str>>(lines: &[S]) -> Result<Self, TimestampError> {
        let mut lines = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty());

        let updated = lines.next().ok_or(TimestampError::Empty)?;
        let published = lines.last().unwrap_or(updated);

        for value in [updated, published] {
            if DateTimeUtc::parse_rfc3339(value).is_none() {
                return Err(TimestampError::Invalid(value.to_string()));
            }
        }

        Ok(Self {
            updated: updated.to_string(),
            published: published.to_string(),
        })
    }

    /// Both timestamps from a file modification time.
    pub fn from_mtime(mtime: SystemTime) -> Self {
        let stamp = DateTimeUtc::from_system_time(mtime).to_rfc3339();
        Self {
            updated: stamp.clone(),
            published: stamp,
        }
    }
}
