//! # Normalize Command Implementation
//!
//! This module implements the `normalize` subcommand, which rewrites catalogs
//! in canonical form: fixed indentation, key order preserved, one trailing
//! newline. With `--check` nothing is written and the command fails if any
//! file is not already normalized, which makes it suitable for CI.
//!
//! Files with duplicate sibling keys are refused: rewriting them would keep
//! only the last value of each duplicate. `--dedupe` accepts exactly that,
//! listing every value it drops. A file that cannot be read or parsed is
//! reported and the remaining files are still processed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::catalog;
use catalog_sync::codec::{normalize_with, Format, DEFAULT_INDENT};
use catalog_sync::lint::dedupe;
use catalog_sync::output::{Marker, OutputConfig};

use super::{load_catalog, print_file_error, refuse_duplicates};

/// Rewrite catalogs in canonical form
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Catalog files to normalize.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Report files that are not normalized instead of rewriting them.
    #[arg(long)]
    pub check: bool,

    /// Resolve duplicate keys by keeping the last value, listing each dropped one.
    #[arg(long, conflicts_with = "check")]
    pub dedupe: bool,

    /// Spaces per nesting level.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

/// Execute the `normalize` command.
pub fn execute(args: NormalizeArgs, output: &OutputConfig) -> Result<ExitCode> {
    let format = Format {
        indent: args.indent,
    };
    let mut failed = 0;

    for file in &args.files {
        match normalize_file(file, &args, &format, output) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(err) => {
                print_file_error(file, &err, output);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        if args.check {
            println!("{} file(s) would be changed or cannot be normalized.", failed);
        } else {
            println!("{} file(s) could not be normalized.", failed);
        }
    }
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Normalize (or check) one file. `Ok(false)` means the file is not
/// normalized and was left alone.
fn normalize_file(
    file: &Path,
    args: &NormalizeArgs,
    format: &Format,
    output: &OutputConfig,
) -> Result<bool> {
    let loaded = load_catalog(file)?;

    if args.dedupe {
        for dropped in dedupe(&loaded.text)?.dropped {
            println!(
                "{} {}:{}:{}: dropped '{}' = {} (kept the value at line {}, column {})",
                output.marker(Marker::Changed),
                file.display(),
                dropped.at.line,
                dropped.at.column,
                dropped.path,
                dropped.value.split_whitespace().collect::<Vec<_>>().join(" "),
                dropped.kept.line,
                dropped.kept.column
            );
        }
    } else if refuse_duplicates(file, &loaded.text, output) {
        return Ok(false);
    }

    if args.check {
        if normalize_with(&loaded.tree, format) != loaded.text {
            println!("{} {}", output.marker(Marker::Changed), file.display());
            return Ok(false);
        }
    } else if catalog::write(file, &loaded.tree, format)? {
        println!("Normalized {}", file.display());
    }
    Ok(true)
}
