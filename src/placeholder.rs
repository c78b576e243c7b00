//! Recognizing "not yet translated" leaf values
//!
//! A placeholder is an ordinary string leaf that marks a missing translation:
//! `TODO`, or text starting with `[MISSING]` / `[MISSING_EN]`. The set of
//! markers is configuration, not algorithm: callers extend a
//! [`PlaceholderPolicy`] with extra rules and every reconciliation operation
//! picks them up.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a rule's pattern is compared against a leaf value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// The whole value equals the pattern.
    Exact,
    /// The value starts with the pattern.
    Prefix,
    /// The pattern is a regular expression searched in the value.
    Regex,
}

/// A single placeholder rule as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRule {
    pub pattern: String,
    #[serde(rename = "match", default = "default_match_kind")]
    pub kind: MatchKind,
}

fn default_match_kind() -> MatchKind {
    MatchKind::Exact
}

impl PlaceholderRule {
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Exact,
        }
    }

    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Prefix,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Regex,
        }
    }
}

/// The built-in marker rules: `TODO`, `[MISSING]…`, `[MISSING_EN]…`.
pub fn default_rules() -> Vec<PlaceholderRule> {
    vec![
        PlaceholderRule::exact("TODO"),
        PlaceholderRule::prefix("[MISSING]"),
        PlaceholderRule::prefix("[MISSING_EN]"),
    ]
}

#[derive(Clone, Debug)]
enum Matcher {
    Exact(String),
    Prefix(String),
    Regex(Regex),
}

impl Matcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::Exact(pattern) => value == pattern,
            Matcher::Prefix(pattern) => value.starts_with(pattern.as_str()),
            Matcher::Regex(regex) => regex.is_match(value),
        }
    }
}

/// A compiled set of placeholder rules.
#[derive(Clone, Debug)]
pub struct PlaceholderPolicy {
    matchers: Vec<Matcher>,
}

impl PlaceholderPolicy {
    /// Compile a list of rules. Fails only on an invalid regex pattern.
    pub fn new(rules: &[PlaceholderRule]) -> Result<Self> {
        let mut policy = Self {
            matchers: Vec::with_capacity(rules.len()),
        };
        for rule in rules {
            policy.push(rule)?;
        }
        Ok(policy)
    }

    /// A policy that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Add one more rule.
    pub fn with_rule(mut self, rule: &PlaceholderRule) -> Result<Self> {
        self.push(rule)?;
        Ok(self)
    }

    fn push(&mut self, rule: &PlaceholderRule) -> Result<()> {
        let matcher = match rule.kind {
            MatchKind::Exact => Matcher::Exact(rule.pattern.clone()),
            MatchKind::Prefix => Matcher::Prefix(rule.pattern.clone()),
            MatchKind::Regex => Matcher::Regex(Regex::new(&rule.pattern)?),
        };
        self.matchers.push(matcher);
        Ok(())
    }

    pub fn is_placeholder(&self, value: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(value))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for PlaceholderPolicy {
    fn default() -> Self {
        Self {
            matchers: vec![
                Matcher::Exact("TODO".to_string()),
                Matcher::Prefix("[MISSING]".to_string()),
                Matcher::Prefix("[MISSING_EN]".to_string()),
            ],
        }
    }
}
