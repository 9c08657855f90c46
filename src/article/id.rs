//! Stable entry identifiers.

use uuid::Uuid;

/// Derive an entry id from the feed id and a discriminant.
///
/// Name-based UUID (version 5, SHA-1): the same inputs always give the same
/// id, so feed readers can deduplicate entries across runs.
#[inline]
pub fn derive_entry_id(feed_id: &Uuid, discriminant: &[u8]) -> Uuid {
    Uuid::new_v5(feed_id, discriminant)
}
