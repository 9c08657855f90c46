//! In-memory feed document.

use crate::{article::Entry, config::FeedConfig, core::SortOrder, utils::date::DateTimeUtc};
use uuid::Uuid;

/// Everything the emitter needs, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub author: String,
    /// Generation time, RFC 3339 UTC.
    pub updated: String,
    pub id: Uuid,
    pub entries: Vec<Entry>,
}

impl FeedDocument {
    /// Feed header from configuration, stamped with `updated`.
    pub fn new(config: &FeedConfig, updated: DateTimeUtc) -> Self {
        Self {
            title: config.feed.title.clone(),
            link: config.feed.base_url.clone(),
            author: config.feed.author.clone(),
            updated: updated.to_rfc3339(),
            id: config.feed_id,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Reorder entries. `Scan` keeps insertion order.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Scan => {}
            SortOrder::Published => self
                .entries
                .sort_by_key(|e| DateTimeUtc::parse_rfc3339(&e.published)),
        }
    }
}
