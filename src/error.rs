//! # Error Handling
//!
//! This module defines the centralized error type for `catalog-sync`. It uses
//! the `thiserror` library to build an `Error` enum that covers every failure
//! the library can report, each variant carrying enough context (file name,
//! offset, pattern) for a human to locate the defect.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum returned by the I/O-facing parts of the crate
//!   (catalog loading, configuration, batch runs).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The pure reconciliation operations (`diff`, `merge`, `fill`, `align`,
//! `lint`) cannot fail on well-formed trees and do not return this type.
//! Parsing a serialized catalog returns a bare [`ParseError`]; the catalog
//! loader wraps it into [`Error::Parse`] together with the file name.
//!
//! Structural collisions found during a merge and duplicate sibling keys found
//! by the lint pass are not errors: they are returned as values so the caller
//! can decide whether to treat them as fatal.

use thiserror::Error;

use crate::codec::ParseError;

/// Main error type for catalog-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A serialized catalog is not well-formed.
    ///
    /// Fatal for that one file; batch runs keep processing the others.
    #[error("Failed to parse {file}: {source}")]
    Parse { file: String, source: ParseError },

    /// An error occurred while parsing the `.catalog-sync.yaml` configuration.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A key path string could not be interpreted.
    #[error("Key path error: {message}")]
    Path { message: String },

    /// A catalog could not be written back.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A placeholder rule carried an invalid regular expression.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A target or key filter pattern is not a valid glob.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
