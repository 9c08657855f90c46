//! Atom 1.0 serialization by direct string templating.
//!
//! # Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <feed xmlns="http://www.w3.org/2005/Atom">
//!   <title>Blog</title>
//!   <link href="https://example.com/blog/"/>
//!   <updated>2024-06-01T10:00:00Z</updated>
//!   <author><name>Author</name></author>
//!   <id>urn:uuid:9c065c53-31bc-4049-a795-936802a6b1df</id>
//!   <entry>
//!     <title>Post</title>
//!     <link href="https://example.com/blog/post.html"/>
//!     <id>urn:uuid:...</id>
//!     <updated>2024-06-01T10:00:00+00:00</updated>
//!     <published>2023-01-01T09:00:00+00:00</published>
//!   </entry>
//! </feed>
//! ```

use super::feed::FeedDocument;
use crate::{article::Entry, core::Escaping};
use std::borrow::Cow;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Render the whole document.
pub fn render(feed: &FeedDocument, escaping: Escaping) -> String {
    let mut xml = String::with_capacity(1024 + feed.entries.len() * 512);

    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<feed xmlns=\"");
    xml.push_str(ATOM_NS);
    xml.push_str("\">\n");

    push_element(&mut xml, 1, "title", &escape_text(&feed.title, escaping));
    push_link(&mut xml, 1, &escape_text(&feed.link, escaping));
    push_element(&mut xml, 1, "updated", &feed.updated);
    xml.push_str("  <author><name>");
    xml.push_str(&escape_text(&feed.author, escaping));
    xml.push_str("</name></author>\n");
    push_element(&mut xml, 1, "id", &format!("urn:uuid:{}", feed.id));

    for entry in &feed.entries {
        render_entry(&mut xml, entry, escaping);
    }

    xml.push_str("</feed>\n");
    xml
}

fn render_entry(xml: &mut String, entry: &Entry, escaping: Escaping) {
    xml.push_str("  <entry>\n");
    push_element(xml, 2, "title", &escape_text(&entry.title, escaping));
    push_link(xml, 2, &escape_text(&entry.link, escaping));
    push_element(xml, 2, "id", &format!("urn:uuid:{}", entry.id));
    push_element(xml, 2, "updated", &escape_text(&entry.updated, escaping));
    push_element(xml, 2, "published", &escape_text(&entry.published, escaping));
    if let Some(content) = &entry.content {
        xml.push_str("    <content type=\"html\"><![CDATA[");
        xml.push_str(&escape_cdata(content, escaping));
        xml.push_str("]]></content>\n");
    }
    xml.push_str("  </entry>\n");
}

/// Push `<name>value</name>` on its own line. `value` must already be escaped.
fn push_element(xml: &mut String, depth: usize, name: &str, value: &str) {
    push_indent(xml, depth);
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(value);
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

fn push_link(xml: &mut String, depth: usize, href: &str) {
    push_indent(xml, depth);
    xml.push_str("<link href=\"");
    xml.push_str(href);
    xml.push_str("\"/>\n");
}

#[inline]
fn push_indent(xml: &mut String, depth: usize) {
    for _ in 0..depth {
        xml.push_str("  ");
    }
}

fn escape_text(s: &str, escaping: Escaping) -> Cow<'_, str> {
    match escaping {
        Escaping::Strict => escape_xml(s),
        Escaping::Legacy => Cow::Borrowed(s),
    }
}

/// Escape special XML characters. Apostrophes are left alone since every
/// attribute is double-quoted.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

/// A CDATA section cannot contain `]]>`: close the section between `]]` and
/// `>` and reopen it.
fn escape_cdata(s: &str, escaping: Escaping) -> Cow<'_, str> {
    match escaping {
        Escaping::Strict if s.contains("]]>") => Cow::Owned(s.replace("]]>", "]]]]><![CDATA[>")),
        _ => Cow::Borrowed(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FeedConfig, utils::date::DateTimeUtc};
    use uuid::Uuid;

    fn feed(entries: Vec<Entry>) -> FeedDocument {
        let mut feed = FeedDocument::new(
            &FeedConfig::default(),
            DateTimeUtc::new(2024, 6, 2, 8, 0, 0),
        );
        for entry in entries {
            feed.push(entry);
        }
        feed
    }

    fn entry(title: &str, content: Option<&str>) -> Entry {
        Entry {
            title: title.to_string(),
            link: "https://gaultier.github.io/blog/post.html".to_string(),
            id: Uuid::parse_str("0f0d6d5e-0b4c-5b1e-8f43-2f1c9d0e4a11").unwrap(),
            updated: "2024-06-01T10:00:00+00:00".to_string(),
            published: "2023-01-01T09:00:00+00:00".to_string(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it's");
    }

    #[test]
    fn test_escape_cdata() {
        assert_eq!(escape_cdata("a ]] > b", Escaping::Strict), "a ]] > b");
        assert_eq!(
            escape_cdata("x]]>y", Escaping::Strict),
            "x]]]]><![CDATA[>y"
        );
        assert_eq!(escape_cdata("x]]>y", Escaping::Legacy), "x]]>y");
    }

    #[test]
    fn test_empty_feed() {
        let xml = render(&feed(vec![]), Escaping::Strict);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <feed xmlns=\"http://www.w3.org/2005/Atom\">\n  \
             <title>Philippe Gaultier's blog</title>\n  \
             <link href=\"https://gaultier.github.io/blog/\"/>\n  \
             <updated>2024-06-02T08:00:00Z</updated>\n  \
             <author><name>Philippe Gaultier</name></author>\n  \
             <id>urn:uuid:9c065c53-31bc-4049-a795-936802a6b1df</id>\n\
             </feed>\n"
        );
    }

    #[test]
    fn test_entry_block() {
        let xml = render(&feed(vec![entry("My Title", None)]), Escaping::Strict);
        assert!(xml.contains(
            "  <entry>\n    \
             <title>My Title</title>\n    \
             <link href=\"https://gaultier.github.io/blog/post.html\"/>\n    \
             <id>urn:uuid:0f0d6d5e-0b4c-5b1e-8f43-2f1c9d0e4a11</id>\n    \
             <updated>2024-06-01T10:00:00+00:00</updated>\n    \
             <published>2023-01-01T09:00:00+00:00</published>\n  \
             </entry>\n"
        ));
        assert!(!xml.contains("<content"));
    }

    #[test]
    fn test_entries_in_order() {
        let xml = render(
            &feed(vec![entry("First", None), entry("Second", None)]),
            Escaping::Strict,
        );
        let first = xml.find("<title>First</title>").unwrap();
        let second = xml.find("<title>Second</title>").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<entry>").count(), 2);
    }

    #[test]
    fn test_content_in_cdata() {
        let xml = render(
            &feed(vec![entry("T", Some("<h1>T</h1><p>a & b</p>"))]),
            Escaping::Strict,
        );
        assert!(xml.contains(
            "<content type=\"html\"><![CDATA[<h1>T</h1><p>a & b</p>]]></content>"
        ));
    }

    #[test]
    fn test_strict_escapes_title() {
        let xml = render(&feed(vec![entry("Fish & <Chips>", None)]), Escaping::Strict);
        assert!(xml.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
    }

    #[test]
    fn test_legacy_keeps_title_verbatim() {
        let xml = render(&feed(vec![entry("Fish & Chips", None)]), Escaping::Legacy);
        assert!(xml.contains("<title>Fish & Chips</title>"));
        assert!(xml.contains("<title>Philippe Gaultier's blog</title>"));
    }

    #[test]
    fn test_strict_output_parses_as_atom() {
        let xml = render(
            &feed(vec![
                entry("Fish & <Chips>", Some("<p>x]]>y</p>")),
                entry("Plain", None),
            ]),
            Escaping::Strict,
        );
        let parsed: atom_syndication::Feed = xml.parse().unwrap();
        assert_eq!(parsed.title().value, "Philippe Gaultier's blog");
        assert_eq!(parsed.entries().len(), 2);
        assert_eq!(parsed.entries()[0].title().value, "Fish & <Chips>");
        assert_eq!(
            parsed.entries()[0]
                .content()
                .and_then(|c| c.value()),
            Some("<p>x]]>y</p>")
        );
        assert_eq!(
            parsed.entries()[1].id(),
            "urn:uuid:0f0d6d5e-0b4c-5b1e-8f43-2f1c9d0e4a11"
        );
        assert!(parsed.entries()[1].published().is_some());
    }
}
