//! Duplicate sibling key detection
//!
//! Two entries with the same key in one object parse without complaint, the
//! last one silently replacing the first. That is how translations get lost
//! when two people add the same section to a catalog, so the raw text is
//! checked before parsing.

use std::collections::HashMap;

use serde::Serialize;

use super::scan::{decode_string, Scanner, TokenKind};
use crate::codec::Location;
use crate::path::KeyPath;

/// A key that appears more than once in the same object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    /// Path of the duplicated key.
    pub path: KeyPath,
    /// Where the key first appeared.
    pub first: Location,
    /// Where this repeat appears.
    pub duplicate: Location,
}

enum FrameKind {
    Object {
        expecting_key: bool,
        current_key: Option<String>,
    },
    Array {
        index: usize,
    },
}

struct Frame {
    id: usize,
    path: KeyPath,
    kind: FrameKind,
}

impl Frame {
    /// Path of the value that is about to be opened inside this frame.
    fn value_path(&self) -> KeyPath {
        match &self.kind {
            FrameKind::Object { current_key, .. } => {
                self.path.child(current_key.as_deref().unwrap_or_default())
            }
            FrameKind::Array { index } => self.path.child(&index.to_string()),
        }
    }
}

/// Scan raw text and report every repeated sibling key.
///
/// Each object instance is tracked separately, so the same key in two
/// different objects (or two objects of an array) is not a duplicate. A key
/// repeated `n` times yields `n - 1` reports, each pointing back at the first
/// occurrence. Malformed input never fails the scan.
///
/// ```
/// use catalog_sync::lint::find_duplicate_siblings;
///
/// let duplicates = find_duplicate_siblings(r#"{"x": "1", "x": "2"}"#);
/// assert_eq!(duplicates.len(), 1);
/// assert_eq!(duplicates[0].path.to_string(), "x");
/// ```
pub fn find_duplicate_siblings(text: &str) -> Vec<DuplicateKey> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut first_seen: HashMap<(usize, String), usize> = HashMap::new();
    let mut next_id = 0;
    let mut duplicates = Vec::new();

    for token in Scanner::new(text) {
        match token.kind {
            TokenKind::String { .. } => {
                let Some(frame) = frames.last_mut() else {
                    continue;
                };
                if let FrameKind::Object {
                    expecting_key,
                    current_key,
                } = &mut frame.kind
                {
                    if !*expecting_key {
                        continue;
                    }
                    let key = decode_string(token.text(text));
                    match first_seen.get(&(frame.id, key.clone())) {
                        Some(&first) => duplicates.push(DuplicateKey {
                            path: frame.path.child(&key),
                            first: Location::from_offset(text, first),
                            duplicate: Location::from_offset(text, token.start),
                        }),
                        None => {
                            first_seen.insert((frame.id, key.clone()), token.start);
                        }
                    }
                    *expecting_key = false;
                    *current_key = Some(key);
                }
            }
            TokenKind::Comma => match frames.last_mut().map(|f| &mut f.kind) {
                Some(FrameKind::Object { expecting_key, .. }) => *expecting_key = true,
                Some(FrameKind::Array { index }) => *index += 1,
                None => {}
            },
            TokenKind::OpenBrace | TokenKind::OpenBracket => {
                let path = frames.last().map(Frame::value_path).unwrap_or_default();
                let kind = if token.kind == TokenKind::OpenBrace {
                    FrameKind::Object {
                        expecting_key: true,
                        current_key: None,
                    }
                } else {
                    FrameKind::Array { index: 0 }
                };
                frames.push(Frame {
                    id: next_id,
                    path,
                    kind,
                });
                next_id += 1;
            }
            TokenKind::CloseBrace | TokenKind::CloseBracket => {
                frames.pop();
            }
            TokenKind::Colon | TokenKind::Other => {}
        }
    }

    duplicates
}
