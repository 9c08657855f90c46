//! Pipeline variants.
//!
//! All variants share the scan → extract → assemble → emit pipeline and
//! differ only in which files are scanned, where the title comes from, how
//! timestamps are sourced and whether the article body is embedded.

use crate::article::{HtmlHeading, MarkdownHeading, ScanRule, TitleExtractor};
use clap::ValueEnum;
use serde::Deserialize;

/// Which kind of article directory is being turned into a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Markdown sources, git history of each `.md` file.
    #[default]
    Markdown,
    /// Rendered HTML, git history of the companion `.md` source.
    Html,
    /// Rendered HTML, filesystem timestamps, full content embedded.
    HtmlContent,
}

/// Where an entry's `updated`/`published` timestamps come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPolicy {
    /// Commit history of the Markdown source.
    History,
    /// Last modification time of the scanned file.
    Filesystem,
}

static MARKDOWN_RULE: ScanRule = ScanRule::new("md", &["README.md", "index.md"]);
static HTML_RULE: ScanRule = ScanRule::new("html", &["README.html", "index.html"]);

impl Variant {
    /// Which directory entries are articles.
    pub fn scan_rule(self) -> &'static ScanRule {
        match self {
            Self::Markdown => &MARKDOWN_RULE,
            Self::Html | Self::HtmlContent => &HTML_RULE,
        }
    }

    /// How the title is located in the raw file text.
    pub fn title_extractor(self) -> &'static dyn TitleExtractor {
        match self {
            Self::Markdown => &MarkdownHeading,
            Self::Html | Self::HtmlContent => &HtmlHeading,
        }
    }

    pub const fn timestamp_policy(self) -> TimestampPolicy {
        match self {
            Self::Markdown | Self::Html => TimestampPolicy::History,
            Self::HtmlContent => TimestampPolicy::Filesystem,
        }
    }

    /// Whether the raw file content is embedded in the entry.
    #[inline]
    pub const fn embeds_content(self) -> bool {
        matches!(self, Self::HtmlContent)
    }

    /// Whether the entry id is derived from the file content instead of
    /// the published file name.
    #[inline]
    pub const fn content_addressed(self) -> bool {
        matches!(self, Self::HtmlContent)
    }

    /// Published (`.html`) file name for a scanned file.
    pub fn html_file_name(self, scanned: &str) -> String {
        match self {
            Self::Markdown => swap_extension(scanned, "md", "html"),
            Self::Html | Self::HtmlContent => scanned.to_string(),
        }
    }

    /// Markdown source whose history dates the entry.
    pub fn markdown_file_name(self, scanned: &str) -> String {
        match self {
            Self::Markdown => scanned.to_string(),
            Self::Html | Self::HtmlContent => swap_extension(scanned, "html", "md"),
        }
    }
}

/// Replace a trailing `.{from}` with `.{to}`; names without it are returned
/// with `.{to}` appended.
fn swap_extension(name: &str, from: &str, to: &str) -> String {
    let stem = name
        .strip_suffix(from)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(name);
    format!("{stem}.{to}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_markdown() {
        assert_eq!(Variant::default(), Variant::Markdown);
    }

    #[test]
    fn test_companion_names() {
        assert_eq!(Variant::Markdown.html_file_name("post.md"), "post.html");
        assert_eq!(Variant::Markdown.markdown_file_name("post.md"), "post.md");
        assert_eq!(Variant::Html.html_file_name("post.html"), "post.html");
        assert_eq!(Variant::Html.markdown_file_name("post.html"), "post.md");
    }

    #[test]
    fn test_swap_extension_only_touches_suffix() {
        assert_eq!(swap_extension("md_tricks.md", "md", "html"), "md_tricks.html");
        assert_eq!(swap_extension("a.b.html", "html", "md"), "a.b.md");
        assert_eq!(swap_extension("noext", "md", "html"), "noext.html");
    }

    #[test]
    fn test_policies() {
        assert_eq!(Variant::Markdown.timestamp_policy(), TimestampPolicy::History);
        assert_eq!(Variant::Html.timestamp_policy(), TimestampPolicy::History);
        assert_eq!(
            Variant::HtmlContent.timestamp_policy(),
            TimestampPolicy::Filesystem
        );
        assert!(Variant::HtmlContent.embeds_content());
        assert!(!Variant::Html.embeds_content());
        assert!(Variant::HtmlContent.content_addressed());
        assert!(!Variant::Markdown.content_addressed());
    }

    #[test]
    fn test_deserialize_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: Variant,
        }
        let w: Wrapper = toml::from_str("variant = \"html-content\"").unwrap();
        assert_eq!(w.variant, Variant::HtmlContent);
    }
}
