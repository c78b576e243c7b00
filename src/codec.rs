//! Reading and writing the serialized catalog format
//!
//! Catalogs are JSON documents whose root is an object and whose values are
//! strings or nested objects. [`parse`] turns text into a [`KeyTree`] and
//! reports malformed input as a [`ParseError`] pointing at the defect;
//! [`normalize`] produces the canonical text form used when writing catalogs
//! back, so repeated reconciliation runs are idempotent and diff-friendly.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

use crate::tree::KeyTree;

/// Indentation used by [`normalize`].
pub const DEFAULT_INDENT: usize = 2;

/// A position inside a serialized document.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with the
/// column counted in characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Compute line and column for a byte offset by counting newlines from
    /// the start of `text`. Offsets past the end are clamped.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;

        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The serialized input is not a well-formed catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {location} (offset {})", location.offset)]
pub struct ParseError {
    pub message: String,
    pub location: Location,
}

impl ParseError {
    fn from_json(text: &str, err: &serde_json::Error) -> Self {
        let offset = offset_of_line_column(text, err.line(), err.column());
        let rendered = err.to_string();
        let message = match rendered.rfind(" at line ") {
            Some(idx) => rendered[..idx].to_string(),
            None => rendered,
        };

        Self {
            message,
            location: Location::from_offset(text, offset),
        }
    }
}

/// serde_json reports 1-based lines and 1-based byte columns.
fn offset_of_line_column(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(text.len())
    };
    (line_start + column.saturating_sub(1)).min(text.len())
}

/// Parse serialized text into a [`KeyTree`].
///
/// Duplicate sibling keys resolve last-write-wins at the first key's position;
/// run [`crate::lint::find_duplicate_siblings`] first to surface them.
///
/// # Examples
///
/// ```
/// use catalog_sync::codec;
///
/// let tree = codec::parse(r#"{"nav": {"home": "Home"}}"#).unwrap();
/// assert_eq!(tree.leaf_count(), 1);
///
/// let err = codec::parse("{\n  \"nav\": 5\n}").unwrap_err();
/// assert_eq!(err.location.line, 2);
/// ```
pub fn parse(text: &str) -> Result<KeyTree, ParseError> {
    serde_json::from_str(text).map_err(|err| ParseError::from_json(text, &err))
}

/// Output formatting options for [`normalize_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    /// Number of spaces per nesting level.
    pub indent: usize,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Serialize a tree in canonical form with the default [`Format`].
pub fn normalize(tree: &KeyTree) -> String {
    normalize_with(tree, &Format::default())
}

/// Serialize a tree in canonical form: first-seen key order, fixed
/// indentation, non-ASCII text left unescaped, trailing newline.
pub fn normalize_with(tree: &KeyTree, format: &Format) -> String {
    let mut out =
        to_pretty_string(tree, format.indent).expect("serializing a KeyTree in memory cannot fail");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn to_pretty_string(tree: &KeyTree, indent: usize) -> serde_json::Result<String> {
    let indent = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    tree.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}
