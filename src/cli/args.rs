//! Command-line argument definitions for the navigation processor
//!
//! This module defines the CLI interface using the clap derive API. Every
//! subcommand shares the logging and configuration flags in [`CommonArgs`].

use crate::app::models::GeoPoint;
use crate::app::services::format_adapters::RawFormat;
use crate::constants::DEFAULT_LOG_LEVEL;
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the navigation processor
///
/// Converts raw shipboard GPS logs into a canonical, time-ordered navigation
/// record file, then quality controls and assesses it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nav_processor",
    version,
    about = "Normalise raw shipboard GPS logs into canonical navigation records",
    long_about = "Reads raw navigation logs in one of a dozen vendor layouts, resolves a calendar \
                  date for every fix, and writes the tab-delimited canonical record format. The \
                  canonical file can then be quality controlled (speed, acceleration, gaps, device \
                  quality) and summarised in a quality assessment report."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert raw logs to a canonical record file
    Convert(ConvertArgs),
    /// Flag implausible records in a canonical file
    Qc(QcArgs),
    /// Summarise a canonical file in a quality assessment report
    Qa(QaArgs),
    /// List supported raw formats
    Formats(FormatsArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to a JSON configuration file
    ///
    /// Keys left out of the file take their defaults. Command-line flags
    /// override values from the file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config: Option<PathBuf>,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Raw format of the input files
    ///
    /// Either the format identifier or its legacy alias (nav1, nav2, ...).
    /// Run the `formats` command for the full list.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        value_name = "FORMAT",
        required_unless_present = "config",
        help = "Raw format identifier or legacy alias"
    )]
    pub format: Option<RawFormat>,

    /// Directory holding the raw log files
    #[arg(
        short = 'i',
        long = "input-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding the raw log files"
    )]
    pub input_dir: PathBuf,

    /// Explicit file names, processed in the order given
    #[arg(
        long = "files",
        value_name = "LIST",
        value_delimiter = ',',
        conflicts_with = "pattern",
        help = "Comma-separated file names, in processing order"
    )]
    pub files: Option<Vec<String>>,

    /// Glob pattern selecting files in the input directory, sorted by name
    #[arg(
        long = "pattern",
        value_name = "GLOB",
        default_value = "*",
        help = "Glob pattern for input files (sorted by name)"
    )]
    pub pattern: String,

    /// Canonical output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Maximum fixes held while waiting for a date reference
    #[arg(long = "buffer-capacity", value_name = "N")]
    pub buffer_capacity: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the qc command
#[derive(Debug, Clone, Parser)]
pub struct QcArgs {
    /// Canonical input file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Quality controlled output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Maximum plausible speed (m/s)
    #[arg(long = "max-speed", value_name = "M/S")]
    pub max_speed: Option<f64>,

    /// Maximum plausible acceleration (m/s^2)
    #[arg(long = "max-accel", value_name = "M/S^2")]
    pub max_accel: Option<f64>,

    /// Longest tolerated gap between epochs (s)
    #[arg(long = "max-gap", value_name = "SECONDS")]
    pub max_gap: Option<f64>,

    /// Leave flagged records out instead of marking them
    #[arg(long = "strict")]
    pub strict: bool,

    /// Append speed and course over ground columns
    #[arg(long = "augment")]
    pub augment: bool,

    /// Earliest acceptable epoch (RFC 3339)
    #[arg(long = "start", value_name = "TIME")]
    pub start: Option<DateTime<Utc>>,

    /// Latest acceptable epoch (RFC 3339)
    #[arg(long = "end", value_name = "TIME")]
    pub end: Option<DateTime<Utc>>,

    /// File receiving one line per flagged record
    #[arg(long = "log", value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the qa command
#[derive(Debug, Clone, Parser)]
pub struct QaArgs {
    /// Canonical input file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Emit the report as JSON instead of text
    #[arg(long = "json")]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Departure port as lon,lat
    #[arg(long = "departure", value_name = "LON,LAT", allow_hyphen_values = true)]
    pub departure: Option<GeoPoint>,

    /// Arrival port as lon,lat
    #[arg(long = "arrival", value_name = "LON,LAT", allow_hyphen_values = true)]
    pub arrival: Option<GeoPoint>,

    /// Nominal epoch interval, inferred from the data when absent
    #[arg(long = "epoch-interval", value_name = "SECONDS")]
    pub epoch_interval: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the formats command
#[derive(Debug, Clone, Parser)]
pub struct FormatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl Commands {
    /// Subcommand name, for error context
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Convert(_) => "convert",
            Commands::Qc(_) => "qc",
            Commands::Qa(_) => "qa",
            Commands::Formats(_) => "formats",
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => DEFAULT_LOG_LEVEL,
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress and summaries (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
