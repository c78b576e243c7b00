//! # Diff Command Implementation
//!
//! This module implements the `diff` subcommand, which compares a target
//! catalog against the reference and lists every key the target lacks, every
//! key only the target has, and every placeholder value still in the target.
//!
//! ## Functionality
//!
//! - **Key Filtering**: `--only` limits the report to matching key paths
//! - **Output Formats**: Text lines with markers, or a JSON document
//! - **Exit Codes**: Returns 0 if the catalogs agree, 1 if differences exist
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::diff::{diff_with, ReconciliationReport};
use catalog_sync::output::{Marker, OutputConfig};
use catalog_sync::path::KeyPath;
use catalog_sync::suggestions;

use super::{key_filter, load_catalog, placeholder_policy, ReportFormat};

/// Show the differences between a reference and a target catalog
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// The authoritative catalog.
    pub reference: PathBuf,

    /// The catalog to compare against the reference.
    pub target: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Only report key paths matching this glob (e.g. 'nav.*').
    #[arg(long, value_name = "GLOB")]
    pub only: Option<String>,

    /// Show only a summary without listing individual keys.
    #[arg(long)]
    pub summary: bool,

    /// Additional value to treat as a placeholder (repeatable).
    #[arg(long = "placeholder", value_name = "VALUE")]
    pub placeholders: Vec<String>,
}

/// Execute the `diff` command.
///
/// Returns exit code 0 if there are no differences, 1 if there are.
pub fn execute(args: DiffArgs, output: &OutputConfig) -> Result<ExitCode> {
    let filter = key_filter(args.only.as_deref())?;
    let policy = placeholder_policy(&args.placeholders)?;
    let reference = load_catalog(&args.reference)?;
    let target = load_catalog(&args.target)?;

    let mut report = diff_with(&reference.tree, &target.tree, &policy);
    if let Some(pattern) = &filter {
        report = report.filtered(pattern);
    }

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text if args.summary => print_summary(&report),
        ReportFormat::Text => print_report(&report, output),
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(report: &ReconciliationReport) {
    if report.is_clean() {
        println!("No differences.");
        return;
    }
    println!("Differences detected:");
    if !report.only_in_reference.is_empty() {
        println!("  {} key(s) missing from target", report.only_in_reference.len());
    }
    if !report.only_in_target.is_empty() {
        println!("  {} key(s) only in target", report.only_in_target.len());
    }
    if !report.placeholders_in_target.is_empty() {
        println!(
            "  {} placeholder value(s) in target",
            report.placeholders_in_target.len()
        );
    }
    println!();
    println!("Total: {} key(s)", report.total());
}

fn print_report(report: &ReconciliationReport, output: &OutputConfig) {
    if report.is_clean() {
        println!("No differences.");
        return;
    }

    print_section(
        output,
        "Missing from target:",
        Marker::Missing,
        &report.only_in_reference,
        |path| {
            suggestions::similar_key(path, &report.only_in_target)
                .map(|similar| format!(" (did you mean '{}'?)", similar))
        },
    );
    print_section(
        output,
        "Only in target:",
        Marker::Extra,
        &report.only_in_target,
        |_| None,
    );
    print_section(
        output,
        "Placeholders in target:",
        Marker::Placeholder,
        &report.placeholders_in_target,
        |_| None,
    );

    println!(
        "Summary: {} missing, {} extra, {} placeholder(s)",
        report.only_in_reference.len(),
        report.only_in_target.len(),
        report.placeholders_in_target.len()
    );
}

fn print_section(
    output: &OutputConfig,
    title: &str,
    marker: Marker,
    paths: &[KeyPath],
    note: impl Fn(&KeyPath) -> Option<String>,
) {
    if paths.is_empty() {
        return;
    }
    println!("{}", output.heading(title));
    for path in paths {
        println!(
            "  {} {}{}",
            output.marker(marker),
            path,
            note(path).unwrap_or_default()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(reference: PathBuf, target: PathBuf) -> DiffArgs {
        DiffArgs {
            reference,
            target,
            format: ReportFormat::Text,
            only: None,
            summary: false,
            placeholders: Vec::new(),
        }
    }

    #[test]
    fn test_execute_missing_reference() {
        let result = execute(
            args("/nonexistent/en.json".into(), "/nonexistent/zh.json".into()),
            &OutputConfig { use_color: false },
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Catalog file not found"));
    }

    #[test]
    fn test_execute_clean_and_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en.json");
        let zh = dir.path().join("zh.json");
        fs::write(&en, r#"{"a": "A"}"#).unwrap();
        fs::write(&zh, r#"{"a": "甲"}"#).unwrap();
        let output = OutputConfig { use_color: false };

        assert_eq!(
            execute(args(en.clone(), zh.clone()), &output).unwrap(),
            ExitCode::SUCCESS
        );

        fs::write(&zh, r#"{"a": "TODO"}"#).unwrap();
        assert_eq!(execute(args(en, zh), &output).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_execute_filter_hides_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en.json");
        let zh = dir.path().join("zh.json");
        fs::write(&en, r#"{"nav": {"home": "Home"}, "footer": {"copy": "C"}}"#).unwrap();
        fs::write(&zh, r#"{"nav": {"home": "首页"}}"#).unwrap();

        let mut filtered = args(en, zh);
        filtered.only = Some("nav.*".to_string());
        assert_eq!(
            execute(filtered, &OutputConfig { use_color: false }).unwrap(),
            ExitCode::SUCCESS
        );
    }
}
