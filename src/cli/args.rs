//! Command-line interface definitions.

use crate::core::{Escaping, SortOrder, Variant};
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Generate an Atom feed for a directory of blog articles
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Directory holding the articles
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Config file path (default: feed.toml inside --dir, optional)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Which article layout to read
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Write the feed to a file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// How titles and content are written into the document
    #[arg(long, value_enum)]
    pub escaping: Option<Escaping>,

    /// Entry order in the emitted document
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Log and drop articles that fail to extract instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Read all article history with a single `git log` call
    #[arg(long)]
    pub bulk_history: bool,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file named explicitly, or the optional `feed.toml` in `dir`.
    ///
    /// The flag is true when the file must exist.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (self.dir.join("feed.toml"), false),
        }
    }
}
