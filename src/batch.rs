//! Config-driven reconciliation of many target catalogs
//!
//! The reference catalog is loaded once; every target is then processed
//! independently and in parallel. For each target the runner:
//!
//! 1.  **Lints** the raw text for duplicate sibling keys.
//! 2.  **Parses** it and diffs it against the reference.
//! 3.  **Fills** missing keys with the target's generator (optional).
//! 4.  **Fills** placeholder values from the reference (optional).
//! 5.  **Writes** the result back when something changed and this is not a
//!     dry run.
//!
//! A failure on one target (unreadable, malformed) is recorded in the
//! [`BatchReport`] and never stops the others. A reference that cannot be
//! loaded fails the whole run.

use std::path::PathBuf;

use log::{info, warn};
use rayon::prelude::*;

use crate::catalog;
use crate::codec::Format;
use crate::config::{Config, ResolvedTarget};
use crate::diff::{self, ReconciliationReport};
use crate::error::{Error, Result};
use crate::fill;
use crate::lint::{self, DuplicateKey};
use crate::merge::{self, StructuralCollision};
use crate::path::KeyPath;
use crate::placeholder::PlaceholderPolicy;
use crate::tree::KeyTree;

/// What a batch run is allowed to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Add reference keys the target lacks.
    pub fill_missing: bool,
    /// Replace placeholder values with reference values.
    pub fill_placeholders: bool,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

impl BatchOptions {
    /// Report only.
    pub fn check() -> Self {
        Self::default()
    }

    /// Fill missing keys and placeholders, and write the targets.
    pub fn sync() -> Self {
        Self {
            fill_missing: true,
            fill_placeholders: true,
            dry_run: false,
        }
    }
}

/// The outcome for one target catalog.
#[derive(Debug, Clone, Default)]
pub struct TargetReport {
    pub path: PathBuf,
    /// Duplicate sibling keys in the target's text.
    pub duplicates: Vec<DuplicateKey>,
    /// The diff before any change was applied.
    pub report: ReconciliationReport,
    /// Leaves added by the missing-key fill.
    pub added: Vec<KeyPath>,
    /// Strings replaced by sub-trees while filling.
    pub collisions: Vec<StructuralCollision>,
    /// Placeholders replaced by reference values.
    pub filled: Vec<KeyPath>,
    /// Whether the file was rewritten.
    pub written: bool,
}

impl TargetReport {
    /// Whether the target had anything to report before changes.
    pub fn has_findings(&self) -> bool {
        !self.duplicates.is_empty() || !self.report.is_clean()
    }

    /// Whether reconciliation changed the target's tree.
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.collisions.is_empty() || !self.filled.is_empty()
    }
}

/// A target that could not be processed.
#[derive(Debug)]
pub struct TargetFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// The outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reference: PathBuf,
    /// Duplicate sibling keys in the reference itself.
    pub reference_duplicates: Vec<DuplicateKey>,
    /// Targets processed, in configuration order.
    pub targets: Vec<TargetReport>,
    /// Targets that failed, in configuration order.
    pub failures: Vec<TargetFailure>,
}

impl BatchReport {
    /// No failures, no duplicates, no gaps.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self.reference_duplicates.is_empty()
            && self.targets.iter().all(|t| !t.has_findings())
    }

    pub fn written(&self) -> usize {
        self.targets.iter().filter(|t| t.written).count()
    }
}

/// Reconcile every configured target against the reference.
pub fn run(config: &Config, options: &BatchOptions) -> Result<BatchReport> {
    let reference = catalog::load(&config.reference)?;
    let reference_duplicates = lint::find_duplicate_siblings(&reference.text);
    for duplicate in &reference_duplicates {
        warn!(
            "{}: duplicate key '{}' at {} (first defined at {})",
            config.reference.display(),
            duplicate.path,
            duplicate.duplicate,
            duplicate.first
        );
    }

    let policy = config.policy()?;
    let format = config.format();
    let targets = config.resolve_targets()?;
    info!(
        "Reconciling {} target(s) against {}",
        targets.len(),
        config.reference.display()
    );

    let results: Vec<(PathBuf, Result<TargetReport>)> = targets
        .par_iter()
        .map(|target| {
            let result = process(&reference.tree, target, &policy, &format, options);
            (target.path.clone(), result)
        })
        .collect();

    let mut report = BatchReport {
        reference: config.reference.clone(),
        reference_duplicates,
        ..Default::default()
    };
    for (path, result) in results {
        match result {
            Ok(target) => report.targets.push(target),
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                report.failures.push(TargetFailure { path, error });
            }
        }
    }
    Ok(report)
}

fn process(
    reference: &KeyTree,
    target: &ResolvedTarget,
    policy: &PlaceholderPolicy,
    format: &Format,
    options: &BatchOptions,
) -> Result<TargetReport> {
    let loaded = catalog::load(&target.path)?;
    let mut result = TargetReport {
        path: target.path.clone(),
        duplicates: lint::find_duplicate_siblings(&loaded.text),
        report: diff::diff_with(reference, &loaded.tree, policy),
        ..Default::default()
    };
    for duplicate in &result.duplicates {
        warn!(
            "{}: duplicate key '{}' at {} (first defined at {})",
            target.path.display(),
            duplicate.path,
            duplicate.duplicate,
            duplicate.first
        );
    }

    let mut tree = loaded.tree;
    if options.fill_missing && !result.report.only_in_reference.is_empty() {
        let generator = target.generator.build();
        let outcome =
            merge::merge_missing(&tree, &result.report.only_in_reference, generator.as_ref());
        tree = outcome.tree;
        result.added = outcome.added;
        result.collisions = outcome.collisions;
    }
    if options.fill_placeholders {
        let outcome = fill::fill_placeholders(reference, &tree, policy, None);
        tree = outcome.tree;
        result.filled = outcome.filled;
    }

    if result.changed() && !options.dry_run {
        if result.duplicates.is_empty() {
            result.written = catalog::write(&target.path, &tree, format)?;
        } else {
            warn!(
                "Not writing {}: rewriting it would drop the duplicated keys' earlier values",
                target.path.display()
            );
        }
    }

    info!(
        "{}: {} missing, {} extra, {} placeholder(s), {} added, {} filled",
        target.path.display(),
        result.report.only_in_reference.len(),
        result.report.only_in_target.len(),
        result.report.placeholders_in_target.len(),
        result.added.len(),
        result.filled.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use std::fs;
    use std::path::Path;

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let config_path = dir.path().join(".catalog-sync.yaml");
        fs::write(
            &config_path,
            "reference: en.json\ntargets: ['*.json']\ngenerator: { style: fixed, value: TODO }\n",
        )
        .unwrap();
        let config = config::from_file(&config_path).unwrap();
        (dir, config)
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn test_check_reports_without_writing() {
        let (dir, config) = setup(&[
            ("en.json", r#"{"a": "A", "b": "B"}"#),
            ("zh.json", r#"{"a": "甲"}"#),
        ]);
        let report = run(&config, &BatchOptions::check()).unwrap();

        assert_eq!(report.targets.len(), 1);
        assert_eq!(report.targets[0].report.only_in_reference.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.written(), 0);
        assert_eq!(read(dir.path(), "zh.json"), r#"{"a": "甲"}"#);
    }

    #[test]
    fn test_sync_fills_and_writes() {
        let (dir, config) = setup(&[
            ("en.json", r#"{"a": "A", "b": {"c": "C"}, "d": "D"}"#),
            ("zh.json", r#"{"a": "甲", "d": "TODO"}"#),
        ]);
        let report = run(&config, &BatchOptions::sync()).unwrap();

        let target = &report.targets[0];
        assert_eq!(target.added.len(), 1);
        // "d" was a placeholder; "b.c" was generated as one and filled right after.
        assert_eq!(target.filled.len(), 2);
        assert!(target.written);
        assert_eq!(
            read(dir.path(), "zh.json"),
            "{\n  \"a\": \"甲\",\n  \"d\": \"D\",\n  \"b\": {\n    \"c\": \"C\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_sync_dry_run_writes_nothing() {
        let (dir, config) = setup(&[("en.json", r#"{"a": "A"}"#), ("de.json", "{}")]);
        let options = BatchOptions {
            dry_run: true,
            ..BatchOptions::sync()
        };
        let report = run(&config, &options).unwrap();
        assert_eq!(report.targets[0].added.len(), 1);
        assert!(!report.targets[0].written);
        assert_eq!(read(dir.path(), "de.json"), "{}");
    }

    #[test]
    fn test_malformed_target_does_not_stop_others() {
        let (dir, config) = setup(&[
            ("en.json", r#"{"a": "A"}"#),
            ("bad.json", r#"{"a": "#),
            ("zh.json", "{}"),
        ]);
        let report = run(&config, &BatchOptions::sync()).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad.json"));
        assert!(matches!(report.failures[0].error, Error::Parse { .. }));
        assert_eq!(report.targets.len(), 1);
        assert!(read(dir.path(), "zh.json").contains("\"a\": \"A\""));
    }

    #[test]
    fn test_malformed_reference_fails_the_run() {
        let (_dir, config) = setup(&[("en.json", "{"), ("zh.json", "{}")]);
        assert!(matches!(
            run(&config, &BatchOptions::check()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_target_with_duplicates_is_not_rewritten() {
        let original = r#"{"a": "1", "a": "2"}"#;
        let (dir, config) = setup(&[("en.json", r#"{"a": "A", "b": "B"}"#), ("zh.json", original)]);
        let report = run(&config, &BatchOptions::sync()).unwrap();

        assert_eq!(report.targets[0].duplicates.len(), 1);
        assert!(!report.targets[0].written);
        assert_eq!(read(dir.path(), "zh.json"), original);
    }

    #[test]
    fn test_clean_targets() {
        let (_dir, config) = setup(&[("en.json", r#"{"a": "A"}"#), ("zh.json", r#"{"a": "甲"}"#)]);
        let report = run(&config, &BatchOptions::sync()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.written(), 0);
    }
}
