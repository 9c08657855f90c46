//! Command-line interface.

mod args;
pub mod generate;

pub use args::Cli;
