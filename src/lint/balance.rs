//! Delimiter balance checking
//!
//! A parse error stops at the first defect, and for a hand-edited catalog that
//! is often far from the real mistake (a brace dropped forty lines earlier).
//! [`check_balance`] walks the whole text and reports every unbalanced brace
//! or bracket along with where its partner was opened.

use std::fmt;

use serde::Serialize;

use super::scan::{Scanner, TokenKind};
use crate::codec::Location;

/// A structural defect in raw catalog text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BalanceIssue {
    /// A closing delimiter with nothing open.
    UnexpectedClose { found: char, at: Location },
    /// A closing delimiter that does not match the innermost open one.
    MismatchedClose {
        expected: char,
        found: char,
        opened_at: Location,
        at: Location,
    },
    /// An opening delimiter that is never closed.
    Unclosed { delimiter: char, opened_at: Location },
    /// The text ends inside a string literal.
    UnterminatedString { at: Location },
    /// Something follows the closed root value.
    TrailingContent { at: Location },
}

impl BalanceIssue {
    /// Where the defect is reported.
    pub fn location(&self) -> Location {
        match self {
            BalanceIssue::UnexpectedClose { at, .. }
            | BalanceIssue::MismatchedClose { at, .. }
            | BalanceIssue::UnterminatedString { at }
            | BalanceIssue::TrailingContent { at } => *at,
            BalanceIssue::Unclosed { opened_at, .. } => *opened_at,
        }
    }
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceIssue::UnexpectedClose { found, at } => {
                write!(f, "unexpected '{}' at {}", found, at)
            }
            BalanceIssue::MismatchedClose {
                expected,
                found,
                opened_at,
                at,
            } => write!(
                f,
                "expected '{}' but found '{}' at {} (opened at {})",
                expected, found, at, opened_at
            ),
            BalanceIssue::Unclosed {
                delimiter,
                opened_at,
            } => write!(f, "'{}' opened at {} is never closed", delimiter, opened_at),
            BalanceIssue::UnterminatedString { at } => {
                write!(f, "string starting at {} is never terminated", at)
            }
            BalanceIssue::TrailingContent { at } => {
                write!(f, "unexpected content after the root object at {}", at)
            }
        }
    }
}

fn closing_for(open: char) -> char {
    if open == '{' {
        '}'
    } else {
        ']'
    }
}

/// Report every delimiter imbalance in `text`.
///
/// A mismatched closer pops the innermost open delimiter so one typo does not
/// cascade into a report per line. Unclosed delimiters are listed innermost
/// first. An empty result does not mean the text parses; it only means the
/// nesting is consistent.
///
/// ```
/// use catalog_sync::lint::check_balance;
///
/// assert!(check_balance(r#"{"a": {"b": "c"}}"#).is_empty());
/// assert_eq!(check_balance(r#"{"a": {"b": "c"}"#).len(), 1);
/// ```
pub fn check_balance(text: &str) -> Vec<BalanceIssue> {
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut issues = Vec::new();
    let mut root_closed = false;
    let at = |offset| Location::from_offset(text, offset);

    for token in Scanner::new(text) {
        if root_closed {
            issues.push(BalanceIssue::TrailingContent {
                at: at(token.start),
            });
            break;
        }

        match token.kind {
            TokenKind::OpenBrace => open.push(('{', token.start)),
            TokenKind::OpenBracket => open.push(('[', token.start)),
            TokenKind::CloseBrace | TokenKind::CloseBracket => {
                let found = if token.kind == TokenKind::CloseBrace {
                    '}'
                } else {
                    ']'
                };
                match open.pop() {
                    None => issues.push(BalanceIssue::UnexpectedClose {
                        found,
                        at: at(token.start),
                    }),
                    Some((delimiter, opened)) if closing_for(delimiter) != found => {
                        issues.push(BalanceIssue::MismatchedClose {
                            expected: closing_for(delimiter),
                            found,
                            opened_at: at(opened),
                            at: at(token.start),
                        })
                    }
                    Some(_) => {}
                }
                root_closed = open.is_empty();
            }
            TokenKind::String { terminated: false } => {
                issues.push(BalanceIssue::UnterminatedString {
                    at: at(token.start),
                })
            }
            TokenKind::String { .. } | TokenKind::Colon | TokenKind::Comma | TokenKind::Other => {}
        }
    }

    issues.extend(
        open.into_iter()
            .rev()
            .map(|(delimiter, opened)| BalanceIssue::Unclosed {
                delimiter,
                opened_at: at(opened),
            }),
    );
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_document() {
        let text = "{\n  \"a\": {\"b\": \"}\"},\n  \"list\": [\"x\", {\"y\": \"]\"}]\n}\n";
        assert!(check_balance(text).is_empty());
    }

    #[test]
    fn test_missing_closing_brace_points_at_opener() {
        let text = "{\n  \"nav\": {\n    \"home\": \"Home\"\n}\n";
        let issues = check_balance(text);
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            BalanceIssue::Unclosed {
                delimiter,
                opened_at,
            } => {
                assert_eq!(*delimiter, '{');
                assert_eq!(opened_at.line, 1);
            }
            other => panic!("unexpected issue: {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_reported_innermost_first() {
        let issues = check_balance(r#"{"a": {"b": ["#);
        let delimiters: Vec<char> = issues
            .iter()
            .map(|issue| match issue {
                BalanceIssue::Unclosed { delimiter, .. } => *delimiter,
                other => panic!("unexpected issue: {:?}", other),
            })
            .collect();
        assert_eq!(delimiters, vec!['[', '{', '{']);
    }

    #[test]
    fn test_unexpected_close() {
        let issues = check_balance("}");
        assert_eq!(
            issues,
            vec![BalanceIssue::UnexpectedClose {
                found: '}',
                at: Location {
                    offset: 0,
                    line: 1,
                    column: 1
                },
            }]
        );
    }

    #[test]
    fn test_mismatched_close() {
        let issues = check_balance(r#"{"a": ["b"}"#);
        assert!(matches!(
            issues.first(),
            Some(BalanceIssue::MismatchedClose {
                expected: ']',
                found: '}',
                ..
            })
        ));
        assert!(issues[0].to_string().contains("expected ']'"));
    }

    #[test]
    fn test_trailing_content_reported_once() {
        let issues = check_balance(r#"{"a": "b"} {"c": "d"} x"#);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], BalanceIssue::TrailingContent { .. }));
        assert_eq!(issues[0].location().offset, 11);
    }

    #[test]
    fn test_unterminated_string() {
        let issues = check_balance("{\"a\": \"oops}\n");
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, BalanceIssue::UnterminatedString { .. })));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, BalanceIssue::Unclosed { .. })));
    }

    #[test]
    fn test_display_mentions_position() {
        let issues = check_balance("{\n");
        assert_eq!(
            issues[0].to_string(),
            "'{' opened at line 1, column 1 is never closed"
        );
    }
}
