//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which loads the
//! `.catalog-sync.yaml` configuration and diffs every target catalog against
//! the reference, also linting each file for duplicate keys.
//!
//! ## Functionality
//!
//! - **Configuration Validation**: The configuration must parse and every
//!   placeholder rule must compile.
//! - **Per-Target Report**: Missing, extra and placeholder key counts for each
//!   target, plus any duplicate keys.
//! - **Exit Codes**: Returns 0 if every target is in sync, 1 if any target has
//!   findings or could not be read.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::batch::{self, BatchOptions, BatchReport};
use catalog_sync::defaults::CONFIG_ENV_VAR;
use catalog_sync::output::{Marker, OutputConfig};

use super::load_config;

/// Diff and lint every configured target
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the .catalog-sync.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = CONFIG_ENV_VAR,
        default_value = ".catalog-sync.yaml"
    )]
    pub config: PathBuf,

    /// List every key instead of per-target counts.
    #[arg(long)]
    pub verbose: bool,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, output: &OutputConfig) -> Result<ExitCode> {
    let config = load_config(&args.config)?;
    println!("Reference: {}", config.reference.display());

    let report = batch::run(&config, &BatchOptions::check())?;
    print_reference_duplicates(&report, output);

    for target in &report.targets {
        let status = if target.has_findings() {
            output.marker(Marker::Problem)
        } else {
            output.paint(Marker::Extra, "ok")
        };
        println!(
            "{} {}: {} missing, {} extra, {} placeholder(s), {} duplicate(s)",
            status,
            target.path.display(),
            target.report.only_in_reference.len(),
            target.report.only_in_target.len(),
            target.report.placeholders_in_target.len(),
            target.duplicates.len()
        );
        if args.verbose {
            for path in &target.report.only_in_reference {
                println!("    {} {}", output.marker(Marker::Missing), path);
            }
            for path in &target.report.only_in_target {
                println!("    {} {}", output.marker(Marker::Extra), path);
            }
            for path in &target.report.placeholders_in_target {
                println!("    {} {}", output.marker(Marker::Placeholder), path);
            }
            for duplicate in &target.duplicates {
                println!(
                    "    {} {} (line {})",
                    output.marker(Marker::Problem),
                    duplicate.path,
                    duplicate.duplicate.line
                );
            }
        }
    }
    print_failures(&report, output);

    if report.is_clean() {
        println!("All {} target(s) are in sync.", report.targets.len());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print duplicate keys found in the reference catalog.
pub fn print_reference_duplicates(report: &BatchReport, output: &OutputConfig) {
    for duplicate in &report.reference_duplicates {
        println!(
            "{} {}: duplicate key '{}' at {}",
            output.marker(Marker::Problem),
            report.reference.display(),
            duplicate.path,
            duplicate.duplicate
        );
    }
}

/// Print the targets that could not be processed.
pub fn print_failures(report: &BatchReport, output: &OutputConfig) {
    for failure in &report.failures {
        println!(
            "{} {}: {}",
            output.marker(Marker::Problem),
            failure.path.display(),
            failure.error
        );
    }
}
