//! # Lint-Duplicates Command Implementation
//!
//! This module implements the `lint-duplicates` subcommand, which reports
//! keys defined more than once in the same object. A JSON parser keeps only
//! the last of them, so the earlier value is silently lost; this check reads
//! the raw text to find them.
//!
//! Files that cannot be read are reported alongside the others. Returns exit
//! code 0 if every file was read and none has duplicates, 1 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use catalog_sync::lint::{find_duplicate_siblings, DuplicateKey};
use catalog_sync::output::OutputConfig;

use super::{print_duplicate, print_file_error, read_source, ReportFormat};

/// Report keys defined twice in the same object
#[derive(Args, Debug)]
pub struct LintDuplicatesArgs {
    /// Catalog files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(Serialize)]
struct FileDuplicates {
    file: PathBuf,
    duplicates: Vec<DuplicateKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the `lint-duplicates` command.
pub fn execute(args: LintDuplicatesArgs, output: &OutputConfig) -> Result<ExitCode> {
    let mut results = Vec::with_capacity(args.files.len());
    let mut errors = Vec::new();
    for file in args.files {
        match read_source(&file) {
            Ok(text) => {
                let duplicates = find_duplicate_siblings(&text);
                results.push(FileDuplicates {
                    file,
                    duplicates,
                    error: None,
                });
            }
            Err(err) => {
                results.push(FileDuplicates {
                    file: file.clone(),
                    duplicates: Vec::new(),
                    error: Some(format!("{:#}", err)),
                });
                errors.push((file, err));
            }
        }
    }
    let total: usize = results.iter().map(|r| r.duplicates.len()).sum();

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        ReportFormat::Text => {
            for (file, err) in &errors {
                print_file_error(file, err, output);
            }
            for result in &results {
                for duplicate in &result.duplicates {
                    print_duplicate(&result.file, duplicate, output);
                }
            }
            if total == 0 {
                println!("No duplicate keys found.");
            } else {
                println!("Found {} duplicate key(s).", total);
            }
            if !errors.is_empty() {
                println!("{} file(s) could not be read.", errors.len());
            }
        }
    }

    Ok(if total == 0 && errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
