//! # Catalog Sync Library
//!
//! This library reconciles hierarchical translation catalogs: nested JSON
//! objects whose leaves are strings, one file per locale. One catalog is the
//! reference; every other catalog is a target that should carry the same keys.
//! The library is used by the `catalog-sync` command-line tool but the engine
//! is pure and can be embedded anywhere trees of strings need comparing.
//!
//! ## Quick Example
//!
//! ```
//! use catalog_sync::generate::TitleCase;
//! use catalog_sync::{codec, diff, merge};
//!
//! let reference = codec::parse(r#"{"nav": {"home": "Home", "signIn": "Sign in"}}"#).unwrap();
//! let target = codec::parse(r#"{"nav": {"home": "首页"}}"#).unwrap();
//!
//! let report = diff::diff(&reference, &target);
//! assert_eq!(report.only_in_reference.len(), 1);
//!
//! let merged = merge::merge_missing(&target, &report.only_in_reference, &TitleCase);
//! assert_eq!(
//!     codec::normalize(&merged.tree),
//!     "{\n  \"nav\": {\n    \"home\": \"首页\",\n    \"signIn\": \"Sign In\"\n  }\n}\n"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Trees (`tree`, `path`)**: An ordered [`tree::KeyTree`] of leaves and
//!   sub-trees, addressed by [`path::KeyPath`].
//! - **Codec (`codec`)**: Parsing text into trees with located errors, and the
//!   canonical normalized output.
//! - **Reconciliation (`diff`, `merge`, `fill`, `align`)**: Pure operations that
//!   compare trees and return new ones; inputs are never modified.
//! - **Policy (`placeholder`, `generate`)**: Which values count as "not yet
//!   translated", and how values for missing keys are produced.
//! - **Lint (`lint`)**: Checks on raw text that parsing would hide, such as
//!   duplicate sibling keys.
//! - **Batch runs (`config`, `catalog`, `batch`)**: Configuration-driven
//!   reconciliation of many files, in parallel.

pub mod align;
pub mod batch;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod defaults;
pub mod diff;
pub mod error;
pub mod fill;
pub mod generate;
pub mod lint;
pub mod merge;
pub mod output;
pub mod path;
pub mod placeholder;
pub mod suggestions;
pub mod tree;

#[cfg(test)]
mod tree_proptest;
