//! Formats command: list the supported raw formats

use colored::Colorize;

use super::shared::{print_header, setup_logging};
use crate::Result;
use crate::app::services::format_adapters::RawFormat;
use crate::cli::args::FormatsArgs;

pub fn run_formats(args: FormatsArgs) -> Result<()> {
    setup_logging(&args.common)?;

    print_header("Supported Raw Formats");
    println!(
        "  {:<24} {:<8} {}",
        "IDENTIFIER".bold(),
        "ALIAS".bold(),
        "DATES FROM".bold()
    );
    for format in RawFormat::ALL {
        println!(
            "  {:<24} {:<8} {}",
            format.identifier().green(),
            format.legacy_alias(),
            format.anchor_description()
        );
    }
    Ok(())
}
