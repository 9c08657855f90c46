//! Title extraction from raw article text.
//!
//! Both extractors are plain substring searches over the file text, not
//! Markdown or HTML parsers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("missing `{0}`")]
    MissingMarker(&'static str),

    #[error("no line break after `{0}`")]
    Unterminated(&'static str),
}

/// Locate the title in the raw text of an article.
pub trait TitleExtractor: Sync {
    fn extract<'a>(&self, content: &'a str) -> Result<&'a str, TitleError>;
}

/// First `# ` marker up to the end of its line, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownHeading;

impl MarkdownHeading {
    const MARKER: &'static str = "# ";
}

impl TitleExtractor for MarkdownHeading {
    fn extract<'a>(&self, content: &'a str) -> Result<&'a str, TitleError> {
        let start = content
            .find(Self::MARKER)
            .ok_or(TitleError::MissingMarker(Self::MARKER))?
            + Self::MARKER.len();
        let rest = &content[start..];
        let end = rest
            .find('\n')
            .ok_or(TitleError::Unterminated(Self::MARKER))?;
        Ok(rest[..end].trim())
    }
}

/// Exact text between the first `<h1>` and the `</h1>` after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlHeading;

impl HtmlHeading {
    const OPEN: &'static str = "<h1>";
    const CLOSE: &'static str = "</h1>";
}

impl TitleExtractor for HtmlHeading {
    fn extract<'a>(&self, content: &'a str) -> Result<&'a str, TitleError> {
        let start = content
            .find(Self::OPEN)
            .ok_or(TitleError::MissingMarker(Self::OPEN))?
            + Self::OPEN.len();
        let rest = &content[start..];
        let end = rest
            .find(Self::CLOSE)
            .ok_or(TitleError::MissingMarker(Self::CLOSE))?;
        Ok(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_title() {
        assert_eq!(MarkdownHeading.extract("# My Title\nbody"), Ok("My Title"));
    }

    #[test]
    fn test_markdown_title_is_trimmed() {
        assert_eq!(
            MarkdownHeading.extract("#    Spaced out  \t\r\nbody"),
            Ok("Spaced out")
        );
    }

    #[test]
    fn test_markdown_title_after_front_matter() {
        let content = "Title: ignored\nTags: x\n---\n# Real Title\n\nText\n";
        assert_eq!(MarkdownHeading.extract(content), Ok("Real Title"));
    }

    #[test]
    fn test_markdown_first_marker_wins() {
        assert_eq!(
            MarkdownHeading.extract("# First\n## Second\n"),
            Ok("First")
        );
    }

    #[test]
    fn test_markdown_missing_marker() {
        assert_eq!(
            MarkdownHeading.extract("no heading here\n"),
            Err(TitleError::MissingMarker("# "))
        );
        // `#` without a space is not a marker
        assert_eq!(
            MarkdownHeading.extract("#hashtag\n"),
            Err(TitleError::MissingMarker("# "))
        );
    }

    #[test]
    fn test_markdown_unterminated() {
        assert_eq!(
            MarkdownHeading.extract("# Title without newline"),
            Err(TitleError::Unterminated("# "))
        );
    }

    #[test]
    fn test_html_title() {
        assert_eq!(
            HtmlHeading.extract("<body><h1>My Title</h1></body>"),
            Ok("My Title")
        );
    }

    #[test]
    fn test_html_title_is_verbatim() {
        assert_eq!(
            HtmlHeading.extract("<h1>  My   Title \n</h1>"),
            Ok("  My   Title \n")
        );
    }

    #[test]
    fn test_html_missing_tags() {
        assert_eq!(
            HtmlHeading.extract("<h2>Nope</h2>"),
            Err(TitleError::MissingMarker("<h1>"))
        );
        assert_eq!(
            HtmlHeading.extract("<h1>Open only"),
            Err(TitleError::MissingMarker("</h1>"))
        );
    }

    #[test]
    fn test_html_close_before_open_is_ignored() {
        assert_eq!(
            HtmlHeading.extract("</h1><h1>Title</h1>"),
            Ok("Title")
        );
    }
}
