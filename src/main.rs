use anyhow::Context;
use clap::{CommandFactory, Parser};
use nav_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let name = command.name();
    let result = commands::run(command).with_context(|| format!("{} failed", name));

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Navigation Processor - Shipboard GPS Log Normaliser");
    println!("===================================================");
    println!();
    println!("Convert raw shipboard GPS logs into canonical, dated navigation records,");
    println!("then quality control and assess them.");
    println!();
    if Args::command().print_help().is_err() {
        println!("Run with --help for usage.");
    }
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a directory of NMEA logs dated by ZDA sentences:");
    println!("    nav_processor convert --format nmea-zda --input-dir raw/ --pattern '*.GPS' \\");
    println!("                          --output cruise.tsv");
    println!();
    println!("    # Flag implausible fixes and append speed/course:");
    println!("    nav_processor qc --input cruise.tsv --output cruise_qc.tsv --augment --log flags.txt");
    println!();
    println!("    # Assessment report as JSON:");
    println!("    nav_processor qa --input cruise_qc.tsv --json --departure -70.67,41.52");
}
