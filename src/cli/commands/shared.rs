//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, and console summary helpers used by
//! every subcommand.

use crate::cli::args::CommonArgs;
use crate::config::NavConfig;
use crate::{Error, Result};
use colored::Colorize;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(common: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nav_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the configuration file if one was given, else defaults
pub fn load_configuration(common: &CommonArgs) -> Result<NavConfig> {
    match &common.config {
        Some(path) => {
            info!("Using config file: {}", path.display());
            NavConfig::from_json_file(path)
        }
        None => {
            debug!("No config file given, using defaults");
            Ok(NavConfig::default())
        }
    }
}

/// Bold section title
pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(title.len()).cyan());
}

/// One aligned `label: value` line
pub fn print_stat(label: &str, value: impl std::fmt::Display) {
    println!("  {:<28} {}", format!("{}:", label), value);
}

/// Count line that turns yellow when non-zero
pub fn print_warning_count(label: &str, count: usize) {
    let value = if count > 0 {
        count.to_string().yellow().to_string()
    } else {
        count.to_string().green().to_string()
    };
    print_stat(label, value);
}

/// Elapsed time in seconds with millisecond resolution
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::ZERO), "0.000s");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let common = CommonArgs {
            config: Some("/nonexistent/run.json".into()),
            ..Default::default()
        };
        assert!(matches!(
            load_configuration(&common),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_defaults_without_config() {
        let config = load_configuration(&CommonArgs::default()).unwrap();
        assert_eq!(config, NavConfig::default());
    }
}
