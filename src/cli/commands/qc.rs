//! QC command: flag implausible canonical records

use std::time::Instant;

use colored::Colorize;

use super::shared::{
    format_duration, load_configuration, print_header, print_stat, print_warning_count,
    setup_logging,
};
use crate::Result;
use crate::app::services::pipeline;
use crate::app::services::quality_control::{QcFlag, QcStats};
use crate::cli::args::QcArgs;
use crate::config::NavConfig;

pub fn run_qc(args: QcArgs) -> Result<()> {
    setup_logging(&args.common)?;

    let config = apply_overrides(load_configuration(&args.common)?, &args);
    config.qc.validate()?;

    let start = Instant::now();
    let stats = pipeline::run_qc(&config, &args.input, &args.output, args.log.as_deref())?;

    if args.common.show_progress() {
        print_summary(&stats, &args, start.elapsed());
    }
    Ok(())
}

/// Command-line flags win over the configuration file
fn apply_overrides(mut config: NavConfig, args: &QcArgs) -> NavConfig {
    let mut qc = config.qc;
    if let Some(speed) = args.max_speed {
        qc = qc.with_max_speed(speed);
    }
    if let Some(accel) = args.max_accel {
        qc = qc.with_max_accel(accel);
    }
    if let Some(gap) = args.max_gap {
        qc = qc.with_max_gap(gap);
    }
    if args.strict {
        qc = qc.with_strict_mode();
    }
    if args.augment {
        qc = qc.with_augmentation();
    }
    if args.start.is_some() || args.end.is_some() {
        let start = args.start.or(qc.window_start);
        let end = args.end.or(qc.window_end);
        qc = qc.with_window(start, end);
    }
    config.qc = qc;
    config
}

fn print_summary(stats: &QcStats, args: &QcArgs, elapsed: std::time::Duration) {
    print_header("Quality Control Summary");
    print_stat("Records read", stats.records_read);
    print_stat("Records written", stats.records_written);
    print_stat("Previously flagged", stats.previously_flagged);
    print_warning_count("Records flagged", stats.records_flagged);
    for flag in QcFlag::ALL {
        print_warning_count(flag.name(), stats.count(flag));
    }
    print_stat("Pass rate", format!("{:.1}%", stats.pass_rate()).bold());
    print_stat("Output", args.output.display());
    if let Some(log) = &args.log {
        print_stat("Flag log", log.display());
    }
    print_stat("Elapsed", format_duration(elapsed));
}
