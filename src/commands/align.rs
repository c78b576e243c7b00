//! # Align Command Implementation
//!
//! This module implements the `align` subcommand, which rebuilds a target
//! catalog with exactly the reference's keys, nesting and key order. Values
//! are taken from the target; a value filed one level too high
//! (`myEvents.title` for `events.myEvents.title`) is moved into place unless
//! `--no-relocate` is given. Keys the reference does not have are dropped and
//! listed.
//!
//! A target with duplicate keys is refused and left untouched.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::align::{align, AlignOptions};
use catalog_sync::codec::{Format, DEFAULT_INDENT};
use catalog_sync::generate::Fixed;
use catalog_sync::output::{Marker, OutputConfig};

use super::{load_catalog, refuse_duplicates, write_catalog};

/// Rebuild a target with exactly the reference's structure
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// The authoritative catalog.
    pub reference: PathBuf,

    /// The catalog to rebuild in place.
    pub target: PathBuf,

    /// Do not look for values one level shallower than their reference key.
    #[arg(long)]
    pub no_relocate: bool,

    /// Value for reference keys the target cannot supply.
    #[arg(long, value_name = "VALUE", default_value = "TODO")]
    pub fill_value: String,

    /// Indentation of the written catalog.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `align` command.
pub fn execute(args: AlignArgs, output: &OutputConfig) -> Result<ExitCode> {
    let reference = load_catalog(&args.reference)?;
    let target = load_catalog(&args.target)?;
    if refuse_duplicates(&args.target, &target.text, output) {
        return Ok(ExitCode::FAILURE);
    }

    let generator = Fixed(args.fill_value);
    let outcome = align(
        &reference.tree,
        &target.tree,
        &AlignOptions {
            relocate: !args.no_relocate,
            generator: &generator,
        },
    );

    for relocation in &outcome.relocated {
        println!(
            "  {} {} -> {}",
            output.marker(Marker::Changed),
            relocation.from,
            relocation.to
        );
    }
    for path in &outcome.generated {
        println!("  {} {}", output.marker(Marker::Placeholder), path);
    }
    for path in &outcome.dropped {
        println!("  {} {}", output.marker(Marker::Missing), path);
    }
    println!(
        "Summary: {} relocated, {} filled, {} dropped",
        outcome.relocated.len(),
        outcome.generated.len(),
        outcome.dropped.len()
    );

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
