//! Convert command: raw logs to canonical records

use std::time::Instant;

use colored::Colorize;
use tracing::info;

use super::shared::{
    format_duration, load_configuration, print_header, print_stat, print_warning_count,
    setup_logging,
};
use crate::app::services::pipeline::{self, ConvertSummary};
use crate::cli::args::ConvertArgs;
use crate::{Error, Result};

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    setup_logging(&args.common)?;

    let mut config = load_configuration(&args.common)?;
    if let Some(format) = args.format {
        config = config.with_format(format);
    }
    if let Some(capacity) = args.buffer_capacity {
        config = config.with_buffer_capacity(capacity);
    }
    config.validate()?;

    let files = pipeline::list_input_files(&args.input_dir, args.files.as_deref(), &args.pattern)?;
    if files.is_empty() {
        return Err(Error::configuration(format!(
            "No input files matched '{}' in {}",
            args.pattern,
            args.input_dir.display()
        )));
    }
    info!("Processing {} files as {}", files.len(), config.format);

    let start = Instant::now();
    let summary = pipeline::convert(&config, &files, &args.output, args.common.show_progress())?;

    if args.common.show_progress() {
        print_summary(&summary, &args, start.elapsed());
    }
    Ok(())
}

fn print_summary(summary: &ConvertSummary, args: &ConvertArgs, elapsed: std::time::Duration) {
    print_header("Conversion Summary");
    print_stat("Files", summary.files);
    print_stat("Lines read", summary.reading.lines_read);
    print_stat("Fixes", summary.reading.fixes);
    print_stat("Anchors", summary.reading.anchors);
    print_warning_count("Checksum failures", summary.reading.checksum_failures);
    print_warning_count("Decode failures", summary.reading.decode_failures);
    print_stat("Duplicates suppressed", summary.reading.duplicates_suppressed);
    print_stat("Day rollovers", summary.dating.day_rollovers);
    print_stat(
        "Records written",
        summary.records_written.to_string().green().bold(),
    );
    print_stat("Output", args.output.display());
    print_stat("Elapsed", format_duration(elapsed));
}
