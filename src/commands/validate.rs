//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks that each
//! catalog parses and that its braces and brackets balance. Parse errors are
//! shown with the surrounding source lines; balance problems are listed with
//! both ends of the mismatch, which usually points closer to the real mistake
//! than the parser does.
//!
//! A file that cannot be read counts as invalid; the others are still checked.
//! Returns exit code 0 if every file is valid, 1 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use catalog_sync::codec;
use catalog_sync::lint::check_balance;
use catalog_sync::output::{Marker, OutputConfig};
use catalog_sync::suggestions::source_excerpt;

use super::{print_file_error, read_source};

/// Check that catalogs parse and their braces balance
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, output: &OutputConfig) -> Result<ExitCode> {
    let mut invalid = 0;

    for file in &args.files {
        let text = match read_source(file) {
            Ok(text) => text,
            Err(err) => {
                print_file_error(file, &err, output);
                invalid += 1;
                continue;
            }
        };
        let issues = check_balance(&text);
        let parsed = codec::parse(&text);

        match (&parsed, issues.is_empty()) {
            (Ok(tree), true) => {
                println!(
                    "{} {} ({} keys)",
                    output.paint(Marker::Extra, "ok"),
                    file.display(),
                    tree.leaf_count()
                );
                continue;
            }
            _ => invalid += 1,
        }

        println!("{} {}", output.marker(Marker::Problem), file.display());
        if let Err(err) = &parsed {
            println!("  {}", err);
            for line in source_excerpt(&text, &err.location).lines() {
                println!("    {}", line);
            }
        }
        for issue in &issues {
            println!("  {}", issue);
        }
    }

    if invalid == 0 {
        println!("All {} file(s) are valid.", args.files.len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} of {} file(s) are invalid.", invalid, args.files.len());
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_execute_valid_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("en.json");
        let bad = dir.path().join("zh.json");
        fs::write(&good, r#"{"a": {"b": "c"}}"#).unwrap();
        fs::write(&bad, "{\n  \"a\": {\n    \"b\": \"c\"\n}\n").unwrap();
        let output = OutputConfig { use_color: false };

        let args = ValidateArgs {
            files: vec![good.clone()],
        };
        assert_eq!(execute(args, &output).unwrap(), ExitCode::SUCCESS);

        let args = ValidateArgs {
            files: vec![good, bad],
        };
        assert_eq!(execute(args, &output).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_execute_rejects_non_string_leaves() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("en.json");
        fs::write(&file, r#"{"count": 3}"#).unwrap();

        let args = ValidateArgs { files: vec![file] };
        assert_eq!(
            execute(args, &OutputConfig { use_color: false }).unwrap(),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn test_execute_continues_after_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("en.json");
        fs::write(&good, r#"{"a": "b"}"#).unwrap();

        let args = ValidateArgs {
            files: vec![dir.path().join("missing.json"), good],
        };
        assert_eq!(
            execute(args, &OutputConfig { use_color: false }).unwrap(),
            ExitCode::FAILURE
        );
    }
}
