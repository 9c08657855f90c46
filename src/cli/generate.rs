//! Feed generation: scan the directory, extract every article, assemble the
//! document and render it.

use crate::{
    article::{Entry, EntryExtractor, ExtractError, TimestampSource, scan},
    config::FeedConfig,
    core::{ErrorPolicy, HistoryMode, TimestampPolicy},
    debug,
    generator::{atom, feed::FeedDocument},
    history::{BulkGitHistory, GitHistory},
    log,
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Produce the complete Atom document for the articles in `dir`.
///
/// Nothing is returned unless every step succeeded.
pub fn generate_feed(dir: &Path, config: &FeedConfig) -> Result<String> {
    let feed = &config.feed;
    let variant = feed.variant;

    let files = scan(dir, variant.scan_rule())?;

    let entries = match (variant.timestamp_policy(), feed.history) {
        (TimestampPolicy::Filesystem, _) => {
            collect_entries(dir, config, TimestampSource::Filesystem, &files)?
        }
        (TimestampPolicy::History, HistoryMode::Follow) => {
            let git = GitHistory::new(dir);
            collect_entries(dir, config, TimestampSource::History(&git), &files)?
        }
        (TimestampPolicy::History, HistoryMode::Bulk) => {
            let bulk = BulkGitHistory::load(dir)
                .with_context(|| format!("failed to read git history of {}", dir.display()))?;
            collect_entries(dir, config, TimestampSource::History(&bulk), &files)?
        }
    };

    let mut document = FeedDocument::new(config, DateTimeUtc::now());
    for entry in entries {
        document.push(entry);
    }
    document.sort(feed.sort);
    debug!("feed"; "{} entries, sorted by {:?}", document.entries.len(), feed.sort);

    Ok(atom::render(&document, feed.escaping))
}

/// Extract one entry per file, in order, applying the configured
/// [`ErrorPolicy`].
pub fn collect_entries(
    dir: &Path,
    config: &FeedConfig,
    timestamps: TimestampSource<'_>,
    files: &[String],
) -> Result<Vec<Entry>, ExtractError> {
    let extractor = EntryExtractor::new(
        dir,
        &config.feed.base_url,
        config.feed_id,
        config.feed.variant,
        timestamps,
    );

    let mut entries = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for file in files {
        match extractor.extract(file) {
            Ok(entry) => {
                debug!("extract"; "{} -> {:?} ({})", file, entry.title, entry.published);
                entries.push(entry);
            }
            Err(err) if config.feed.on_error == ErrorPolicy::Skip => {
                skipped.push(err.file().to_string());
                log!("skip"; "{:#}", anyhow::Error::new(err));
            }
            Err(err) => return Err(err),
        }
    }

    if !skipped.is_empty() {
        log!("skip"; "{} article(s) left out: {}", skipped.len(), skipped.join(", "));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Variant, history::fake::FakeHistory};
    use std::{
        fs::{self, File},
        time::{Duration, UNIX_EPOCH},
    };
    use tempfile::TempDir;

    fn config(variant: Variant, on_error: ErrorPolicy) -> FeedConfig {
        let mut config = FeedConfig::default();
        config.feed.variant = variant;
        config.feed.on_error = on_error;
        config
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_collect_keeps_scan_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.md", "# Bee\n");
        write(&dir, "a.md", "# Ay\n");
        let history = FakeHistory::default()
            .with("a.md", &["2024-01-01T00:00:00+00:00"])
            .with("b.md", &["2023-01-01T00:00:00+00:00"]);

        let entries = collect_entries(
            dir.path(),
            &config(Variant::Markdown, ErrorPolicy::Abort),
            TimestampSource::History(&history),
            &files(&["b.md", "a.md"]),
        )
        .unwrap();

        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Bee", "Ay"]);
        assert_eq!(entries[0].link, "https://gaultier.github.io/blog/b.html");
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", "# Good\n");
        write(&dir, "bad.md", "no heading here\n");
        let history = FakeHistory::default()
            .with("good.md", &["2024-01-01T00:00:00+00:00"])
            .with("bad.md", &["2024-01-01T00:00:00+00:00"]);

        let err = collect_entries(
            dir.path(),
            &config(Variant::Markdown, ErrorPolicy::Abort),
            TimestampSource::History(&history),
            &files(&["good.md", "bad.md"]),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::MissingTitle { .. }));
        assert_eq!(err.file(), "bad.md");
    }

    #[test]
    fn test_skip_drops_failing_articles() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", "# Good\n");
        write(&dir, "untracked.md", "# Untracked\n");
        let history = FakeHistory::default().with("good.md", &["2024-01-01T00:00:00+00:00"]);

        let entries = collect_entries(
            dir.path(),
            &config(Variant::Markdown, ErrorPolicy::Skip),
            TimestampSource::History(&history),
            &files(&["untracked.md", "good.md"]),
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Good");
    }

    #[test]
    fn test_generate_html_content_feed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "hello.html", "<h1>Hello</h1><p>x</p>");
        write(&dir, "index.html", "<h1>Index</h1>");
        File::options()
            .write(true)
            .open(dir.path().join("hello.html"))
            .unwrap()
            .set_modified(UNIX_EPOCH + Duration::from_secs(1_704_067_200))
            .unwrap();

        let xml = generate_feed(
            dir.path(),
            &config(Variant::HtmlContent, ErrorPolicy::Abort),
        )
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("<updated>2024-01-01T00:00:00Z</updated>"));
        assert!(xml.contains("<![CDATA[<h1>Hello</h1><p>x</p>]]>"));
        assert!(!xml.contains("Index"));
        assert_eq!(xml.matches("<entry>").count(), 1);
    }

    #[test]
    fn test_generate_fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(generate_feed(&missing, &FeedConfig::default()).is_err());
    }
}
