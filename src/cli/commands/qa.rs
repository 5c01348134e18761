//! QA command: assessment report for a canonical file

use colored::Colorize;
use tracing::info;

use super::shared::{load_configuration, print_header, setup_logging};
use crate::app::services::pipeline;
use crate::cli::args::QaArgs;
use crate::config::NavConfig;
use crate::{Error, Result};

pub fn run_qa(args: QaArgs) -> Result<()> {
    setup_logging(&args.common)?;

    let config = apply_overrides(load_configuration(&args.common)?, &args);
    let report = pipeline::run_qa(&config, &args.input)?;

    let rendered = if args.json {
        report.to_json()?
    } else {
        report.render_text()
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|e| {
                Error::io(format!("Failed to write report {}", path.display()), e)
            })?;
            info!("Report written to {}", path.display());
            if args.common.show_progress() {
                println!("{} {}", "Report written to".green(), path.display());
            }
        }
        None => {
            if !args.json && args.common.show_progress() {
                print_header("Quality Assessment Report");
            }
            print!("{}", rendered);
            if args.json {
                println!();
            }
        }
    }
    Ok(())
}

fn apply_overrides(mut config: NavConfig, args: &QaArgs) -> NavConfig {
    if args.departure.is_some() {
        config.qa.departure_port = args.departure;
    }
    if args.arrival.is_some() {
        config.qa.arrival_port = args.arrival;
    }
    if args.epoch_interval.is_some() {
        config.qa.epoch_interval_secs = args.epoch_interval;
    }
    config
}
