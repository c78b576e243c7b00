//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which brings every target
//! catalog named in `.catalog-sync.yaml` in line with the reference: missing
//! keys are added with the target's generator, placeholder values are
//! replaced with reference values, and changed files are written back in
//! normalized form.
//!
//! Targets that fail to parse are reported and skipped; the others are still
//! processed. Targets with duplicate keys are reported but not rewritten.
//! Returns exit code 1 if any target was skipped or left unwritten for
//! either reason.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::batch::{self, BatchOptions};
use catalog_sync::defaults::CONFIG_ENV_VAR;
use catalog_sync::output::{Marker, OutputConfig};

use super::check::{print_failures, print_reference_duplicates};
use super::load_config;

/// Fill every configured target from the reference
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the .catalog-sync.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = CONFIG_ENV_VAR,
        default_value = ".catalog-sync.yaml"
    )]
    pub config: PathBuf,

    /// Only add missing keys; leave placeholder values alone.
    #[arg(long)]
    pub no_placeholders: bool,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<ExitCode> {
    let config = load_config(&args.config)?;
    let options = BatchOptions {
        fill_missing: true,
        fill_placeholders: !args.no_placeholders,
        dry_run: args.dry_run,
    };

    let report = batch::run(&config, &options)?;
    print_reference_duplicates(&report, output);

    let mut blocked = 0;
    for target in &report.targets {
        let state = if target.written {
            "written"
        } else if !target.changed() {
            "up to date"
        } else if !target.duplicates.is_empty() {
            blocked += 1;
            "not written: duplicate keys"
        } else {
            "not written: dry run"
        };
        println!(
            "{} {}: {} added, {} filled ({})",
            output.marker(Marker::Changed),
            target.path.display(),
            target.added.len(),
            target.filled.len(),
            state
        );
        for collision in &target.collisions {
            println!(
                "    {} replaced string at '{}' (was {:?})",
                output.marker(Marker::Problem),
                collision.path,
                collision.replaced
            );
        }
    }
    print_failures(&report, output);

    println!(
        "Synced {} target(s), wrote {}.",
        report.targets.len(),
        report.written()
    );
    Ok(if report.failures.is_empty() && blocked == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_execute_writes_targets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"a": "A", "b": "B"}"#).unwrap();
        fs::write(dir.path().join("zh.json"), r#"{"a": "甲", "b": "TODO"}"#).unwrap();
        let config = dir.path().join(".catalog-sync.yaml");
        fs::write(&config, "reference: en.json\ntargets: ['*.json']\n").unwrap();

        let args = SyncArgs {
            config,
            no_placeholders: false,
            dry_run: false,
        };
        assert_eq!(
            execute(args, &OutputConfig { use_color: false }).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("zh.json")).unwrap(),
            "{\n  \"a\": \"甲\",\n  \"b\": \"B\"\n}\n"
        );
    }

    #[test]
    fn test_execute_no_placeholders_keeps_todo() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"a": "A", "b": "B"}"#).unwrap();
        fs::write(dir.path().join("zh.json"), r#"{"b": "TODO"}"#).unwrap();
        let config = dir.path().join(".catalog-sync.yaml");
        fs::write(
            &config,
            "reference: en.json\ntargets: ['*.json']\ngenerator: { style: marker }\n",
        )
        .unwrap();

        let args = SyncArgs {
            config,
            no_placeholders: true,
            dry_run: false,
        };
        execute(args, &OutputConfig { use_color: false }).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("zh.json")).unwrap(),
            "{\n  \"b\": \"TODO\",\n  \"a\": \"[MISSING] a\"\n}\n"
        );
    }
}
