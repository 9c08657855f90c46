//! Output and error-handling switches shared by config and CLI.

use clap::ValueEnum;
use serde::Deserialize;

/// How text is written into the XML document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Escaping {
    /// Escape markup characters in text and attributes, split `]]>` in CDATA.
    #[default]
    Strict,
    /// Write titles, links and content exactly as found.
    Legacy,
}

/// Order of entries in the emitted feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Directory listing order.
    #[default]
    Scan,
    /// Oldest publication first.
    Published,
}

/// What to do when a single article cannot be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failure; nothing is emitted.
    #[default]
    Abort,
    /// Log the failure and leave the article out of the feed.
    Skip,
}

/// How commit history is fetched for history-dated variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// One `git log --follow` per article.
    #[default]
    Follow,
    /// One `git log --name-status` for the whole directory.
    Bulk,
}
