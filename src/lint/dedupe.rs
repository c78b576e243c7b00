//! Repairing catalogs with duplicate sibling keys

use serde::Serialize;

use super::duplicates::find_duplicate_siblings;
use super::scan::{Scanner, TokenKind};
use crate::codec::{self, Location, ParseError};
use crate::path::KeyPath;
use crate::tree::KeyTree;

/// An occurrence of a repeated key whose value does not survive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DroppedValue {
    pub path: KeyPath,
    /// Where the dropped occurrence's key is.
    pub at: Location,
    /// Where the occurrence that wins is.
    pub kept: Location,
    /// Source text of the dropped value.
    pub value: String,
}

/// The result of [`dedupe`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DedupeOutcome {
    /// The parsed tree, in which the last occurrence of every key won.
    pub tree: KeyTree,
    /// Every earlier occurrence, in document order.
    pub dropped: Vec<DroppedValue>,
}

/// Resolve repeated sibling keys the way the parser does (the last value
/// wins, at the position of the first occurrence) and list what is lost.
///
/// # Examples
///
/// ```
/// use catalog_sync::keytree;
/// use catalog_sync::lint::dedupe;
///
/// let outcome = dedupe(r#"{"a": "1", "b": "2", "a": "3"}"#).unwrap();
/// assert_eq!(outcome.tree, keytree! { "a" => "3", "b" => "2" });
/// assert_eq!(outcome.dropped[0].value, r#""1""#);
/// ```
pub fn dedupe(text: &str) -> Result<DedupeOutcome, ParseError> {
    let tree = codec::parse(text)?;

    // Repeats are reported against the first occurrence; group them by it.
    let mut groups: Vec<(KeyPath, Vec<Location>)> = Vec::new();
    for duplicate in find_duplicate_siblings(text) {
        match groups
            .iter_mut()
            .find(|(_, occurrences)| occurrences[0] == duplicate.first)
        {
            Some((_, occurrences)) => occurrences.push(duplicate.duplicate),
            None => groups.push((duplicate.path, vec![duplicate.first, duplicate.duplicate])),
        }
    }

    let mut dropped = Vec::new();
    for (path, occurrences) in groups {
        let Some((&kept, earlier)) = occurrences.split_last() else {
            continue;
        };
        for &at in earlier {
            dropped.push(DroppedValue {
                path: path.clone(),
                at,
                kept,
                value: value_text(text, at.offset).to_string(),
            });
        }
    }
    dropped.sort_by_key(|d| d.at.offset);

    Ok(DedupeOutcome { tree, dropped })
}

/// The source text of the value following the key that starts at `offset`.
fn value_text(text: &str, offset: usize) -> &str {
    let rest = &text[offset..];
    let mut tokens = Scanner::new(rest)
        .skip_while(|token| !matches!(token.kind, TokenKind::Colon))
        .skip(1);

    let Some(first) = tokens.next() else {
        return "";
    };
    let end = match first.kind {
        TokenKind::OpenBrace | TokenKind::OpenBracket => {
            let mut depth = 1usize;
            let mut end = rest.len();
            for token in tokens {
                match token.kind {
                    TokenKind::OpenBrace | TokenKind::OpenBracket => depth += 1,
                    TokenKind::CloseBrace | TokenKind::CloseBracket => {
                        depth -= 1;
                        if depth == 0 {
                            end = token.end;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            end
        }
        _ => first.end,
    };
    &rest[first.start..end]
}
