//! Command-line argument definitions for the relcheck CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Flags given here take precedence over the configuration
//! file.

use clap::Parser;

use relcheck::config::ReportFormat;

/// Command-line arguments for the relcheck tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the schema document's JSON intermediate representation
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Write the report to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format (human, json)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Exit with an error when any diagnostic is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
