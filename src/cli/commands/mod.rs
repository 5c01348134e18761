//! Command implementations for the navigation processor CLI
//!
//! Each subcommand lives in its own module. They all follow the same
//! sequence: set up logging, load the configuration file if one was given,
//! apply command-line overrides, run one pipeline stage, and print a summary.

pub mod convert;
pub mod formats;
pub mod qa;
pub mod qc;
pub mod shared;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the subcommand handler
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Convert(args) => convert::run_convert(args),
        Commands::Qc(args) => qc::run_qc(args),
        Commands::Qa(args) => qa::run_qa(args),
        Commands::Formats(args) => formats::run_formats(args),
    }
}
