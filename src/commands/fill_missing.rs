//! # Fill-Missing Command Implementation
//!
//! This module implements the `fill-missing` subcommand, which adds every key
//! the reference has and the target lacks to the target catalog. Values for
//! the new keys come from the selected generator; existing translations are
//! never overwritten.
//!
//! When a target has a string where the reference has a sub-tree, the string
//! is replaced so the missing keys can be created. Each replacement is
//! printed so the lost value can be recovered by hand.
//!
//! A target with duplicate keys is refused and left untouched.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::codec::{Format, DEFAULT_INDENT};
use catalog_sync::diff::diff;
use catalog_sync::generate::{GeneratorSpec, GeneratorStyle};
use catalog_sync::merge::merge_missing;
use catalog_sync::output::{Marker, OutputConfig};

use super::{load_catalog, refuse_duplicates, write_catalog};

/// Add keys the target is missing, with generated values
#[derive(Args, Debug)]
pub struct FillMissingArgs {
    /// The authoritative catalog.
    pub reference: PathBuf,

    /// The catalog to fill in place.
    pub target: PathBuf,

    /// How values for new keys are generated.
    #[arg(long, value_enum, value_name = "STYLE")]
    pub generator: Option<GeneratorStyle>,

    /// Prefix, marker or constant for the generator.
    #[arg(long, value_name = "VALUE")]
    pub value: Option<String>,

    /// Indentation of the written catalog.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `fill-missing` command.
pub fn execute(args: FillMissingArgs, output: &OutputConfig) -> Result<ExitCode> {
    let reference = load_catalog(&args.reference)?;
    let target = load_catalog(&args.target)?;
    if refuse_duplicates(&args.target, &target.text, output) {
        return Ok(ExitCode::FAILURE);
    }

    let report = diff(&reference.tree, &target.tree);
    if report.only_in_reference.is_empty() {
        println!("{} has every reference key.", args.target.display());
        return Ok(ExitCode::SUCCESS);
    }

    let generator = GeneratorSpec::new(args.generator.unwrap_or_default(), args.value).build();
    let outcome = merge_missing(&target.tree, &report.only_in_reference, generator.as_ref());

    for collision in &outcome.collisions {
        println!(
            "{} replaced string at '{}' with a sub-tree (was {:?})",
            output.marker(Marker::Problem),
            collision.path,
            collision.replaced
        );
    }
    println!("Adding {} key(s):", outcome.added.len());
    for path in &outcome.added {
        println!("  {} {}", output.marker(Marker::Changed), path);
    }

    write_catalog(
        &args.target,
        &outcome.tree,
        &Format {
            indent: args.indent,
        },
        args.dry_run,
    )?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_execute_fills_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en.json");
        let zh = dir.path().join("zh.json");
        fs::write(&en, r#"{"events": {"browse": {"foundCount": "Found"}}}"#).unwrap();
        fs::write(&zh, "{}").unwrap();

        let args = FillMissingArgs {
            reference: en,
            target: zh.clone(),
            generator: Some(GeneratorStyle::Prefixed),
            value: Some("[ZH] ".to_string()),
            indent: 2,
            dry_run: false,
        };
        execute(args, &OutputConfig { use_color: false }).unwrap();
        assert_eq!(
            fs::read_to_string(&zh).unwrap(),
            "{\n  \"events\": {\n    \"browse\": {\n      \"foundCount\": \"[ZH] Found Count\"\n    }\n  }\n}\n"
        );
    }

    #[test]
    fn test_execute_dry_run_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en.json");
        let zh = dir.path().join("zh.json");
        fs::write(&en, r#"{"a": "A"}"#).unwrap();
        fs::write(&zh, "{}").unwrap();

        let args = FillMissingArgs {
            reference: en,
            target: zh.clone(),
            generator: None,
            value: None,
            indent: 2,
            dry_run: true,
        };
        execute(args, &OutputConfig { use_color: false }).unwrap();
        assert_eq!(fs::read_to_string(&zh).unwrap(), "{}");
    }

    #[test]
    fn test_execute_refuses_target_with_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let en = dir.path().join("en.json");
        let zh = dir.path().join("zh.json");
        fs::write(&en, r#"{"admin":{"a":"A","b":"B"},"c":"C"}"#).unwrap();
        fs::write(&zh, r#"{"admin":{"a":"甲"},"admin":{"b":"乙"}}"#).unwrap();

        let args = FillMissingArgs {
            reference: en,
            target: zh.clone(),
            generator: None,
            value: None,
            indent: 2,
            dry_run: false,
        };
        assert_eq!(
            execute(args, &OutputConfig { use_color: false }).unwrap(),
            ExitCode::FAILURE
        );
        assert_eq!(fs::read_to_string(&zh).unwrap(), r#"{"admin":{"a":"甲"},"admin":{"b":"乙"}}"#);
    }
}
