//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// layerseg-config: resolve patch collection configurations
///
/// Fills every absent field of a configuration file from override parameters
/// and defaults, probing the first input file for scan geometry, and prints
/// the result.
#[derive(Debug, Parser)]
#[command(name = "layerseg-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the base configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Path to a file of override parameters (takes precedence over --config)
    #[arg(long, short)]
    pub overrides: Option<PathBuf>,

    /// Directory holding the scans
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the ground truth (defaults to the data directory)
    #[arg(long = "label-dir")]
    pub label_dir: Option<PathBuf>,

    /// Input file name (can be specified multiple times; default: every file in the data directory)
    #[arg(long = "file", value_name = "NAME")]
    pub files: Vec<String>,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for layerseg-config
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "layerseg.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
