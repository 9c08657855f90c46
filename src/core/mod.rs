//! Core types - pure abstractions shared across the codebase.

mod options;
mod variant;

pub use options::{ErrorPolicy, Escaping, HistoryMode, SortOrder};
pub use variant::{TimestampPolicy, Variant};
