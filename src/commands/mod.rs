//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `catalog-sync` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic, returning the process exit code.
//!
//! The helpers below are shared by the commands that read catalogs and
//! configuration files.

pub mod align;
pub mod check;
pub mod completions;
pub mod diff;
pub mod fill_missing;
pub mod fill_placeholders;
pub mod keys;
pub mod lint_duplicates;
pub mod normalize;
pub mod sync;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use glob::Pattern;

use catalog_sync::catalog::{self, Catalog};
use catalog_sync::codec::Format;
use catalog_sync::config::{self, Config};
use catalog_sync::error::Error;
use catalog_sync::lint::{find_duplicate_siblings, DuplicateKey};
use catalog_sync::output::{Marker, OutputConfig};
use catalog_sync::placeholder::{PlaceholderPolicy, PlaceholderRule};
use catalog_sync::suggestions;
use catalog_sync::tree::KeyTree;

/// How a report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// A JSON document on stdout
    Json,
}

/// Load a catalog, turning parse errors into a message with a source excerpt.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(suggestions::catalog_not_found(path));
    }
    catalog::load(path).map_err(|err| match &err {
        Error::Parse { source, .. } => {
            let excerpt = catalog::read_text(path)
                .map(|text| suggestions::source_excerpt(&text, &source.location))
                .unwrap_or_default();
            anyhow::anyhow!("{}\n\n{}", err, excerpt.trim_end())
        }
        _ => anyhow::Error::new(err),
    })
}

/// Read a file's raw text for the text-level checks.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(suggestions::catalog_not_found(path));
    }
    Ok(catalog::read_text(path)?)
}

/// Load the configuration file, with hints when it is missing.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(suggestions::config_not_found(path));
    }
    config::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))
}

/// Compile an optional `--only` filter.
pub fn key_filter(only: Option<&str>) -> Result<Option<Pattern>> {
    only.map(|pattern| Pattern::new(pattern).map_err(|e| suggestions::invalid_glob(pattern, &e)))
        .transpose()
}

/// The default placeholder policy extended with `--placeholder` values.
pub fn placeholder_policy(extra: &[String]) -> Result<PlaceholderPolicy> {
    let mut policy = PlaceholderPolicy::default();
    for value in extra {
        policy = policy.with_rule(&PlaceholderRule::exact(value.as_str()))?;
    }
    Ok(policy)
}

/// Write `tree` to `path` unless this is a dry run; report what happened.
pub fn write_catalog(path: &Path, tree: &KeyTree, format: &Format, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("Dry run: {} was not modified", path.display());
        return Ok(());
    }
    if catalog::write(path, tree, format)? {
        println!("Wrote {}", path.display());
    } else {
        println!("{} is already up to date", path.display());
    }
    Ok(())
}

/// Print one duplicate key as `file:line:column: ...`.
pub fn print_duplicate(path: &Path, duplicate: &DuplicateKey, output: &OutputConfig) {
    println!(
        "{} {}:{}:{}: duplicate key '{}' (first defined at line {}, column {})",
        output.marker(Marker::Problem),
        path.display(),
        duplicate.duplicate.line,
        duplicate.duplicate.column,
        duplicate.path,
        duplicate.first.line,
        duplicate.first.column
    );
}

/// Check a file about to be rewritten for duplicate keys.
///
/// Rewriting keeps only the last value of each duplicate, so when there are
/// any they are printed and `true` is returned; the caller must not write.
pub fn refuse_duplicates(path: &Path, text: &str, output: &OutputConfig) -> bool {
    let duplicates = find_duplicate_siblings(text);
    if duplicates.is_empty() {
        return false;
    }
    for duplicate in &duplicates {
        print_duplicate(path, duplicate, output);
    }
    println!(
        "{} was not modified: it has {} duplicate key(s); \
         run 'catalog-sync normalize --dedupe' to keep the last value of each",
        path.display(),
        duplicates.len()
    );
    true
}

/// Report a file that could not be processed, so a multi-file run can carry
/// on with the next one.
pub fn print_file_error(path: &Path, err: &anyhow::Error, output: &OutputConfig) {
    println!("{} {}", output.marker(Marker::Problem), path.display());
    for line in err.to_string().lines() {
        if line.is_empty() {
            println!();
        } else {
            println!("    {}", line);
        }
    }
}
