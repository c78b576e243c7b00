//! Checks that run on raw catalog text
//!
//! Parsing is lossy in the ways that matter most for catalogs: a repeated key
//! silently wins over its earlier sibling, and a syntax error is reported at
//! one spot only. The passes here work on the unparsed text instead, using a
//! lenient tokenizer that never fails.
//!
//! - [`find_duplicate_siblings`] reports keys repeated within one object.
//! - [`check_balance`] reports unbalanced braces and brackets.
//! - [`dedupe`] resolves duplicates and lists every value it drops.

mod balance;
mod dedupe;
mod duplicates;
pub mod scan;

pub use balance::{check_balance, BalanceIssue};
pub use dedupe::{dedupe, DedupeOutcome, DroppedValue};
pub use duplicates::{find_duplicate_siblings, DuplicateKey};

use serde::Serialize;

/// Findings of every text-level check for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub duplicates: Vec<DuplicateKey>,
    pub balance: Vec<BalanceIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.balance.is_empty()
    }
}

/// Run every text-level check on `text`.
pub fn lint(text: &str) -> LintReport {
    LintReport {
        duplicates: find_duplicate_siblings(text),
        balance: check_balance(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_clean_document() {
        assert!(lint(r#"{"a": {"b": "c"}}"#).is_clean());
    }

    #[test]
    fn test_lint_collects_both_kinds() {
        let report = lint(r#"{"a": "1", "a": "2""#);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.balance.len(), 1);
        assert!(!report.is_clean());
    }
}
