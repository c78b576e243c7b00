//! # Fill-Placeholders Command Implementation
//!
//! This module implements the `fill-placeholders` subcommand, which replaces
//! placeholder values in a target catalog (`TODO`, `[MISSING] ...`) with the
//! reference catalog's value at the same key.
//!
//! Placeholders the reference cannot fill are listed. With
//! `--mark-unresolved` they are rewritten to `[MISSING_EN] <key>` so they stay
//! easy to find.
//!
//! A target with duplicate keys is refused and left untouched.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::codec::{Format, DEFAULT_INDENT};
use catalog_sync::fill::{fill_placeholders, unresolved_marker};
use catalog_sync::generate::LeafGenerator;
use catalog_sync::output::{Marker, OutputConfig};

use super::{load_catalog, placeholder_policy, refuse_duplicates, write_catalog};

/// Replace placeholder values with the reference's values
#[derive(Args, Debug)]
pub struct FillPlaceholdersArgs {
    /// The authoritative catalog.
    pub reference: PathBuf,

    /// The catalog to fill in place.
    pub target: PathBuf,

    /// Rewrite placeholders the reference cannot fill to '[MISSING_EN] <key>'.
    #[arg(long)]
    pub mark_unresolved: bool,

    /// Additional value to treat as a placeholder (repeatable).
    #[arg(long = "placeholder", value_name = "VALUE")]
    pub placeholders: Vec<String>,

    /// Indentation of the written catalog.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `fill-placeholders` command.
pub fn execute(args: FillPlaceholdersArgs, output: &OutputConfig) -> Result<ExitCode> {
    let policy = placeholder_policy(&args.placeholders)?;
    let reference = load_catalog(&args.reference)?;
    let target = load_catalog(&args.target)?;
    if refuse_duplicates(&args.target, &target.text, output) {
        return Ok(ExitCode::FAILURE);
    }

    let marker: Option<&dyn LeafGenerator> = if args.mark_unresolved {
        Some(&unresolved_marker)
    } else {
        None
    };
    let outcome = fill_placeholders(&reference.tree, &target.tree, &policy, marker);

    if outcome.filled.is_empty() {
        println!("No placeholders filled in {}.", args.target.display());
    } else {
        println!("Filled {} placeholder(s):", outcome.filled.len());
        for path in &outcome.filled {
            println!("  {} {}", output.marker(Marker::Changed), path);
        }
    }
    if !outcome.unresolved.is_empty() {
        println!("No reference value for {} placeholder(s):", outcome.unresolved.len());
        for path in &outcome.unresolved {
            println!("  {} {}", output.marker(Marker::Placeholder), path);
        }
    }

    if outcome.tree != target.tree {
        write_catalog(
            &args.target,
            &outcome.tree,
            &Format {
                indent: args.indent,
            },
            args.dry_run,
        )?;
    }
    Ok(ExitCode::SUCCESS)
}
