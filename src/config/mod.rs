//! Feed configuration from an optional `feed.toml`.
//!
//! # Sections
//!
//! | Section  | Purpose                                                  |
//! |----------|----------------------------------------------------------|
//! | `[feed]` | Feed metadata (title, author, url, id) and output switches |
//!
//! Command-line flags override file values. The result is validated once
//! and then only read.

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::Cli,
    core::{ErrorPolicy, Escaping, HistoryMode, SortOrder, Variant},
    debug, log,
};
use anyhow::{Result, bail};
use serde::Deserialize;
use std::{fs, path::Path};
use url::Url;
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Philippe Gaultier's blog";
pub const DEFAULT_AUTHOR: &str = "Philippe Gaultier";
pub const DEFAULT_BASE_URL: &str = "https://gaultier.github.io/blog/";
pub const DEFAULT_FEED_ID: &str = "9c065c53-31bc-4049-a795-936802a6b1df";

/// `[feed]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedSection {
    pub title: String,
    pub author: String,
    /// Prefix for every entry link and the feed's own link.
    pub base_url: String,
    /// Feed UUID, also the namespace for entry ids.
    pub id: String,
    pub variant: Variant,
    pub escaping: Escaping,
    pub sort: SortOrder,
    pub on_error: ErrorPolicy,
    pub history: HistoryMode,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            id: DEFAULT_FEED_ID.to_string(),
            variant: Variant::default(),
            escaping: Escaping::default(),
            sort: SortOrder::default(),
            on_error: ErrorPolicy::default(),
            history: HistoryMode::default(),
        }
    }
}

/// Root configuration structure representing `feed.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub feed: FeedSection,

    /// Parsed form of `feed.id`, filled in by [`FeedConfig::validate`].
    #[serde(skip)]
    pub feed_id: Uuid,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed: FeedSection::default(),
            feed_id: Uuid::parse_str(DEFAULT_FEED_ID).unwrap_or_default(),
        }
    }
}

impl FeedConfig {
    /// Load, override and validate configuration for this invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (path, required) = cli.config_path();

        let mut config = if path.is_file() {
            debug!("config"; "loading {}", path.display());
            Self::from_path(&path)?
        } else if required {
            bail!(ConfigError::NotFound(path));
        } else {
            debug!("config"; "no {}, using defaults", path.display());
            Self::default()
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Command-line flags win over file values.
    fn apply_cli(&mut self, cli: &Cli) {
        update_option(&mut self.feed.variant, cli.variant.as_ref());
        update_option(&mut self.feed.escaping, cli.escaping.as_ref());
        update_option(&mut self.feed.sort, cli.sort.as_ref());
        if cli.skip_invalid {
            self.feed.on_error = ErrorPolicy::Skip;
        }
        if cli.bulk_history {
            self.feed.history = HistoryMode::Bulk;
        }
    }

    /// Validate configuration and resolve `feed_id`.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let feed = &self.feed;

        if feed.title.trim().is_empty() {
            diag.error("feed.title", "must not be empty");
        }
        if feed.author.trim().is_empty() {
            diag.error("feed.author", "must not be empty");
        }

        validate_base_url(&feed.base_url, &mut diag);

        match Uuid::parse_str(&feed.id) {
            Ok(id) => self.feed_id = id,
            Err(err) => diag.error_with_hint(
                "feed.id",
                format!("`{}` is not a UUID: {err}", feed.id),
                "generate one with `uuidgen`",
            ),
        }

        if feed.history == HistoryMode::Bulk && feed.variant == Variant::HtmlContent {
            diag.warn(
                "feed.history",
                "html-content entries are dated by modification time, history mode has no effect",
            );
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
    if let Some(option) = cli_option {
        *config_option = option.clone();
    }
}

fn validate_base_url(base_url: &str, diag: &mut ConfigDiagnostics) {
    let url = match Url::parse(base_url) {
        Ok(url) => url,
        Err(err) => {
            diag.error_with_hint(
                "feed.base_url",
                format!("invalid URL `{base_url}`: {err}"),
                "use a full URL such as https://example.com/blog/",
            );
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        diag.error(
            "feed.base_url",
            format!("unsupported scheme `{}`, expected http or https", url.scheme()),
        );
    }
    if url.host_str().is_none_or(str::is_empty) {
        diag.error("feed.base_url", format!("`{base_url}` has no host"));
    }
    if !base_url.ends_with('/') {
        diag.warn(
            "feed.base_url",
            format!("`{base_url}` does not end with `/`, entry links are appended verbatim"),
        );
    }
}
