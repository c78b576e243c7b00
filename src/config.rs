//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `.catalog-sync.yaml` configuration file and the logic for parsing it. A
//! configuration names one reference catalog and any number of target
//! catalogs, plus the placeholder rules and leaf generator used when targets
//! are reconciled in a batch.
//!
//! ```yaml
//! reference: src/i18n/locales/en.json
//! targets:
//!   - src/i18n/locales/*.json
//!   - path: src/i18n/locales/zh.json
//!     generator: { style: prefixed, value: "[ZH] " }
//! placeholders:
//!   - { pattern: "TODO", match: exact }
//! generator: { style: title-case }
//! indent: 2
//! ```
//!
//! ## Key Components
//!
//! - **`Config`**: The parsed file.
//! - **`TargetEntry`**: Either a glob pattern or an explicit path with its own
//!   generator.
//! - **`ResolvedTarget`**: A concrete target file after glob expansion.
//!
//! Relative paths are resolved against the directory containing the
//! configuration file when it is loaded with [`from_file`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::codec::{Format, DEFAULT_INDENT};
use crate::error::{Error, Result};
use crate::generate::GeneratorSpec;
use crate::placeholder::{default_rules, PlaceholderPolicy, PlaceholderRule};

/// One entry of the `targets:` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetEntry {
    /// A glob pattern; every match except the reference is a target.
    Pattern(String),
    /// A single file, optionally with its own generator.
    Explicit {
        path: PathBuf,
        #[serde(default)]
        generator: Option<GeneratorSpec>,
    },
}

/// The `.catalog-sync.yaml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The authoritative catalog.
    pub reference: PathBuf,
    /// Catalogs reconciled against the reference.
    pub targets: Vec<TargetEntry>,
    /// Values treated as "not yet translated".
    #[serde(default = "default_rules")]
    pub placeholders: Vec<PlaceholderRule>,
    /// Generator for targets that do not name their own.
    #[serde(default)]
    pub generator: GeneratorSpec,
    /// Indentation used when writing catalogs back.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

/// A target file after glob expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub generator: GeneratorSpec,
}

impl Config {
    /// Compile the configured placeholder rules.
    pub fn policy(&self) -> Result<PlaceholderPolicy> {
        PlaceholderPolicy::new(&self.placeholders)
    }

    /// Output format for written catalogs.
    pub fn format(&self) -> Format {
        Format {
            indent: self.indent,
        }
    }

    /// Expand the target list into concrete files.
    ///
    /// Pattern matches are sorted and the reference is excluded. An explicit
    /// entry for a file that a pattern also matched keeps the pattern's
    /// position but takes the explicit generator.
    pub fn resolve_targets(&self) -> Result<Vec<ResolvedTarget>> {
        let mut resolved: IndexMap<PathBuf, GeneratorSpec> = IndexMap::new();

        for entry in &self.targets {
            match entry {
                TargetEntry::Pattern(pattern) => {
                    let mut matches = Vec::new();
                    for found in glob::glob(pattern)? {
                        matches.push(found.map_err(|err| Error::Io(err.into_error()))?);
                    }
                    if matches.is_empty() {
                        warn!("Target pattern '{}' matched no files", pattern);
                    }
                    matches.sort();
                    for path in matches {
                        if self.is_reference(&path) {
                            continue;
                        }
                        resolved
                            .entry(path)
                            .or_insert_with(|| self.generator.clone());
                    }
                }
                TargetEntry::Explicit { path, generator } => {
                    if self.is_reference(path) {
                        warn!(
                            "Ignoring target {}: it is the reference catalog",
                            path.display()
                        );
                        continue;
                    }
                    let generator = generator.clone().unwrap_or_else(|| self.generator.clone());
                    resolved.insert(path.clone(), generator);
                }
            }
        }

        debug!("Resolved {} target catalog(s)", resolved.len());
        Ok(resolved
            .into_iter()
            .map(|(path, generator)| ResolvedTarget { path, generator })
            .collect())
    }

    fn is_reference(&self, path: &Path) -> bool {
        if path == self.reference {
            return true;
        }
        match (path.canonicalize(), self.reference.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Rebase every relative path onto `base`.
    fn rebase(&mut self, base: &Path) {
        if self.reference.is_relative() {
            self.reference = base.join(&self.reference);
        }
        for entry in &mut self.targets {
            match entry {
                TargetEntry::Pattern(pattern) => {
                    if Path::new(pattern.as_str()).is_relative() {
                        // The directory is literal text; only the pattern may glob.
                        let literal = glob::Pattern::escape(&base.to_string_lossy());
                        *pattern = Path::new(&literal)
                            .join(pattern.as_str())
                            .to_string_lossy()
                            .into_owned();
                    }
                }
                TargetEntry::Explicit { path, .. } => {
                    if path.is_relative() {
                        *path = base.join(&*path);
                    }
                }
            }
        }
    }
}

/// Parses a YAML string into a `Config`.
///
/// Besides the YAML shape, the placeholder rules must compile and at least
/// one target must be listed.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml_content).map_err(|err| {
        let message = err.to_string();
        let hint = hint_for(&message);
        Error::ConfigParse { message, hint }
    })?;

    if config.targets.is_empty() {
        return Err(Error::ConfigParse {
            message: "No target catalogs configured".to_string(),
            hint: Some("Add at least one file or glob under 'targets:'".to_string()),
        });
    }
    if config.indent > 16 {
        return Err(Error::ConfigParse {
            message: format!("Indent of {} is out of range", config.indent),
            hint: Some("Use a value between 0 and 16".to_string()),
        });
    }
    config.policy().map_err(|err| Error::ConfigParse {
        message: format!("Invalid placeholder rule: {}", err),
        hint: Some("Rules with 'match: regex' must be valid regular expressions".to_string()),
    })?;

    Ok(config)
}

fn hint_for(message: &str) -> Option<String> {
    let hint = if message.contains("missing field `reference`") {
        "Add 'reference: path/to/en.json' naming the authoritative catalog"
    } else if message.contains("missing field `targets`") {
        "Add a 'targets:' list of catalog files or glob patterns"
    } else if message.contains("unknown field") {
        "Valid keys are: reference, targets, placeholders, generator, indent"
    } else if message.contains("unknown variant") {
        "Generator styles are: title-case, prefixed, marker, fixed; match kinds are: exact, prefix, regex"
    } else {
        return None;
    };
    Some(hint.to_string())
}

/// Parse a `Config` from a YAML file path, resolving relative paths against
/// the file's directory.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let mut config = parse(&content)?;
    if let Some(base) = path.parent() {
        config.rebase(base);
    }
    Ok(config)
}
