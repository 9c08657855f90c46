//! Article discovery and per-article metadata extraction.
//!
//! - **scan**: which files in the directory are articles
//! - **title**: where the title sits in the raw text
//! - **id**: stable entry identifiers
//! - **extract**: everything above plus timestamps, for one file

mod extract;
mod id;
mod scan;
mod title;

pub use extract::{Entry, EntryExtractor, ExtractError, TimestampSource};
pub use id::derive_entry_id;
pub use scan::{ScanRule, scan};
pub use title::{HtmlHeading, MarkdownHeading, TitleError, TitleExtractor};
