//! atomfeed - Generate an Atom feed for a directory of blog articles.

mod article;
mod cli;
mod config;
mod core;
mod generator;
mod history;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, generate::generate_feed};
use config::FeedConfig;
use std::{
    fs,
    io::{self, Write},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = FeedConfig::load(&cli)?;
    let xml = generate_feed(&cli.dir, &config)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &xml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("feed"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(xml.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write feed to stdout")?;
        }
    }

    Ok(())
}
