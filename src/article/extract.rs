//! Per-file metadata extraction.

use super::{TitleError, derive_entry_id};
use crate::{
    core::{TimestampPolicy, Variant},
    history::{HistoryError, HistoryProvider, TimestampError, Timestamps},
};
use std::{fs, io, path::Path};
use thiserror::Error;
use uuid::Uuid;

/// One article's metadata record within the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub id: Uuid,
    pub updated: String,
    pub published: String,
    /// Raw file content, for variants that embed it.
    pub content: Option<String>,
}

/// Failure to extract a single article. Always names the offending file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read `{file}`")]
    Read {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read modification time of `{file}`")]
    Metadata {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to query history of `{file}`")]
    History {
        file: String,
        #[source]
        source: HistoryError,
    },

    #[error("no title found in `{file}`")]
    MissingTitle {
        file: String,
        #[source]
        source: TitleError,
    },

    #[error("no commit history for `{file}`")]
    EmptyHistory { file: String },

    #[error("invalid timestamp in history of `{file}`: `{value}`")]
    InvalidTimestamp { file: String, value: String },
}

impl ExtractError {
    /// File the error is about.
    pub fn file(&self) -> &str {
        match self {
            Self::Read { file, .. }
            | Self::Metadata { file, .. }
            | Self::History { file, .. }
            | Self::MissingTitle { file, .. }
            | Self::EmptyHistory { file }
            | Self::InvalidTimestamp { file, .. } => file,
        }
    }
}

/// Where timestamps come from, matching the variant's [`TimestampPolicy`].
pub enum TimestampSource<'a> {
    History(&'a dyn HistoryProvider),
    Filesystem,
}

/// Turns scanned file names into feed entries.
pub struct EntryExtractor<'a> {
    dir: &'a Path,
    base_url: &'a str,
    feed_id: Uuid,
    variant: Variant,
    timestamps: TimestampSource<'a>,
}

impl<'a> EntryExtractor<'a> {
    pub fn new(
        dir: &'a Path,
        base_url: &'a str,
        feed_id: Uuid,
        variant: Variant,
        timestamps: TimestampSource<'a>,
    ) -> Self {
        debug_assert_eq!(
            matches!(timestamps, TimestampSource::Filesystem),
            variant.timestamp_policy() == TimestampPolicy::Filesystem,
            "timestamp source does not match variant"
        );
        Self {
            dir,
            base_url,
            feed_id,
            variant,
            timestamps,
        }
    }

    /// Extract the entry for one scanned file name.
    pub fn extract(&self, file_name: &str) -> Result<Entry, ExtractError> {
        let path = self.dir.join(file_name);
        let content = fs::read_to_string(&path).map_err(|source| ExtractError::Read {
            file: file_name.to_string(),
            source,
        })?;

        let title = self
            .variant
            .title_extractor()
            .extract(&content)
            .map_err(|source| ExtractError::MissingTitle {
                file: file_name.to_string(),
                source,
            })?
            .to_string();

        let html_file_name = self.variant.html_file_name(file_name);
        let id = if self.variant.content_addressed() {
            derive_entry_id(&self.feed_id, content.as_bytes())
        } else {
            derive_entry_id(&self.feed_id, html_file_name.as_bytes())
        };

        let Timestamps { updated, published } = self.timestamps(file_name, &path)?;
        let link = format!("{}{}", self.base_url, html_file_name);

        Ok(Entry {
            title,
            link,
            id,
            updated,
            published,
            content: self.variant.embeds_content().then_some(content),
        })
    }

    fn timestamps(&self, file_name: &str, path: &Path) -> Result<Timestamps, ExtractError> {
        match &self.timestamps {
            TimestampSource::History(provider) => {
                let source_name = self.variant.markdown_file_name(file_name);
                let lines =
                    provider
                        .history(&source_name)
                        .map_err(|source| ExtractError::History {
                            file: source_name.clone(),
                            source,
                        })?;
                Timestamps::from_history(lines.as_slice()).map_err(|err| match err {
                    TimestampError::Empty => ExtractError::EmptyHistory { file: source_name },
                    TimestampError::Invalid(value) => ExtractError::InvalidTimestamp {
                        file: source_name,
                        value,
                    },
                })
            }
            TimestampSource::Filesystem => {
                let metadata_error = |source| ExtractError::Metadata {
                    file: file_name.to_string(),
                    source,
                };
                let mtime = fs::metadata(path)
                    .and_then(|m| m.modified())
                    .map_err(metadata_error)?;
                Ok(Timestamps::from_mtime(mtime))
            }
        }
    }
}
