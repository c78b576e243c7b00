//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use catalog_sync::defaults::DEFAULT_LOG_LEVEL;
use catalog_sync::output::OutputConfig;

use crate::commands;

/// Catalog Sync - Keep translation catalogs in step with a reference locale
#[derive(Parser, Debug)]
#[command(name = "catalog-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace) [default: warn, or RUST_LOG]
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a target catalog against the reference
    Diff(commands::diff::DiffArgs),

    /// Add keys the target is missing, with generated values
    FillMissing(commands::fill_missing::FillMissingArgs),

    /// Replace placeholder values with the reference's values
    FillPlaceholders(commands::fill_placeholders::FillPlaceholdersArgs),

    /// Rebuild a target with exactly the reference's structure
    Align(commands::align::AlignArgs),

    /// Report keys defined twice in the same object
    LintDuplicates(commands::lint_duplicates::LintDuplicatesArgs),

    /// Check that catalogs parse and their braces balance
    Validate(commands::validate::ValidateArgs),

    /// Rewrite catalogs in canonical form
    Normalize(commands::normalize::NormalizeArgs),

    /// List the keys of a catalog
    Keys(commands::keys::KeysArgs),

    /// Diff and lint every configured target
    Check(commands::check::CheckArgs),

    /// Fill every configured target from the reference
    Sync(commands::sync::SyncArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(self.log_level.as_deref());
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Diff(args) => commands::diff::execute(args, &output),
            Commands::FillMissing(args) => commands::fill_missing::execute(args, &output),
            Commands::FillPlaceholders(args) => commands::fill_placeholders::execute(args, &output),
            Commands::Align(args) => commands::align::execute(args, &output),
            Commands::LintDuplicates(args) => commands::lint_duplicates::execute(args, &output),
            Commands::Validate(args) => commands::validate::execute(args, &output),
            Commands::Normalize(args) => commands::normalize::execute(args, &output),
            Commands::Keys(args) => commands::keys::execute(args),
            Commands::Check(args) => commands::check::execute(args, &output),
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. An explicit `--log-level` wins over `RUST_LOG`.
fn init_logging(level: Option<&str>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_LOG_LEVEL),
        ),
    };
    builder.format_timestamp(None).format_target(false);
    // A second initialisation (in tests) is harmless.
    let _ = builder.try_init();
}
