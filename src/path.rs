//! Key paths for addressing nodes inside a catalog tree
//!
//! A [`KeyPath`] is the unit of comparison between two catalogs: the ordered
//! list of keys leading from the root to a node. Its textual form is dot
//! notation (`events.browse.foundCount`), which is what reports print and what
//! `--only` filters match against.
//!
//! Supported input syntax:
//! - Dot notation: `foo.bar.baz`
//! - Bracket notation: `foo["bar.baz"]` or `foo['bar']`
//! - Escaped characters: `foo\.bar` (literal dot), `foo\\bar` (literal backslash)

use std::fmt;
use std::str::FromStr;

use glob::Pattern;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// An ordered sequence of keys identifying a node from the tree root.
///
/// The empty path denotes the root itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from raw segments; no escaping is interpreted.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dot/bracket notation string into a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_sync::path::KeyPath;
    ///
    /// let path = KeyPath::parse(r#"events.browse["found.count"]"#).unwrap();
    /// assert_eq!(path.segments(), ["events", "browse", "found.count"]);
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = path.chars().peekable();
        let mut escaped = false;

        while let Some(ch) = chars.next() {
            if escaped {
                current.push(ch);
                escaped = false;
                continue;
            }

            match ch {
                '\\' => escaped = true,
                '.' => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }

                    match chars.peek().copied() {
                        Some(quote @ ('"' | '\'')) => {
                            chars.next();
                            let mut key = String::new();
                            let mut bracket_escaped = false;
                            let mut closed = false;

                            while let Some(ch) = chars.next() {
                                if bracket_escaped {
                                    key.push(ch);
                                    bracket_escaped = false;
                                } else if ch == '\\' {
                                    bracket_escaped = true;
                                } else if ch == quote && chars.peek() == Some(&']') {
                                    chars.next();
                                    closed = true;
                                    break;
                                } else {
                                    key.push(ch);
                                }
                            }

                            if !closed {
                                return Err(Error::Path {
                                    message: format!("unterminated quoted segment in '{}'", path),
                                });
                            }
                            segments.push(key);
                        }
                        _ => {
                            let mut content = String::new();
                            let mut closed = false;
                            for next in chars.by_ref() {
                                if next == ']' {
                                    closed = true;
                                    break;
                                }
                                content.push(next);
                            }

                            if !closed {
                                return Err(Error::Path {
                                    message: format!("missing ']' in '{}'", path),
                                });
                            }
                            if !content.trim().is_empty() {
                                segments.push(content.trim().to_string());
                            }
                        }
                    }
                }
                _ => current.push(ch),
            }
        }

        if escaped {
            return Err(Error::Path {
                message: format!("trailing escape character in '{}'", path),
            });
        }
        if !current.is_empty() {
            segments.push(current);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path one level up, or `None` for the root.
    pub fn parent(&self) -> Option<KeyPath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A new path with `key` appended.
    pub fn child(&self, key: &str) -> KeyPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(key.to_string());
        Self { segments }
    }

    /// The same path with its first segment removed.
    ///
    /// Returns `None` unless at least two segments are present, since a
    /// single-segment path has no shallower counterpart.
    pub fn without_first(&self) -> Option<KeyPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[1..].to_vec(),
        })
    }

    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Match the dot-notation form of this path against a glob pattern.
    pub fn matches(&self, pattern: &Pattern) -> bool {
        pattern.matches(&self.to_string())
    }
}

fn write_segment(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    for ch in segment.chars() {
        if matches!(ch, '.' | '\\' | '[') {
            f.write_str("\\")?;
        }
        write!(f, "{}", ch)?;
    }
    Ok(())
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_empty() {
                f.write_str("[\"\"]")?;
                continue;
            }
            if i > 0 {
                f.write_str(".")?;
            }
            write_segment(f, segment)?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        KeyPath::parse(&raw).map_err(serde::de::Error::custom)
    }
}
