//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_sync::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::codec::Location;
use crate::path::KeyPath;

/// Generate an error for when the configuration file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .catalog-sync.yaml file naming a 'reference' and 'targets'\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set CATALOG_SYNC_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for a catalog file that does not exist.
pub fn catalog_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Catalog file not found: {path}\n\n\
         hint: Check the path; catalogs are JSON files such as locales/en.json\n\
         hint: Create an empty catalog containing {{}} to start a new locale",
        path = path.display()
    )
}

/// Generate an error for an invalid `--only` key filter.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid key filter: {pattern}\n\
         error: {error}\n\n\
         hint: Filters match dotted key paths, e.g. 'nav.*' or 'events.**'\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}

/// Render the lines around `location`, marking the offending line with `>>`
/// and the column with a caret.
///
/// ```
/// use catalog_sync::codec::Location;
/// use catalog_sync::suggestions::source_excerpt;
///
/// let text = "{\n  \"a\": \"b\",\n}\n";
/// let location = Location::from_offset(text, 14);
/// let excerpt = source_excerpt(text, &location);
/// assert!(excerpt.contains(">>    3 | }"));
/// ```
pub fn source_excerpt(text: &str, location: &Location) -> String {
    const CONTEXT: usize = 2;

    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let target = location.line.clamp(1, lines.len());
    let first = target.saturating_sub(CONTEXT).max(1);
    let last = (target + CONTEXT).min(lines.len());

    let mut out = String::new();
    for number in first..=last {
        let marker = if number == target { ">>" } else { "  " };
        out.push_str(&format!("{} {:>4} | {}\n", marker, number, lines[number - 1]));
        if number == target {
            let pad = " ".repeat(location.column.saturating_sub(1));
            out.push_str(&format!("        | {}^\n", pad));
        }
    }
    out
}

/// Find a key in `candidates` that looks like a misspelling of `missing`.
///
/// Only keys under the same parent are considered, and only when the last
/// segments are within an edit distance of 2.
pub fn similar_key<'a>(missing: &KeyPath, candidates: &'a [KeyPath]) -> Option<&'a KeyPath> {
    let name = missing.last()?;
    let parent = missing.parent();
    candidates
        .iter()
        .filter(|candidate| candidate.parent() == parent)
        .filter_map(|candidate| {
            let distance = edit_distance(name, candidate.last()?);
            (distance > 0 && distance <= 2 && distance < name.chars().count())
                .then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(s: &str) -> KeyPath {
        KeyPath::parse(s).unwrap()
    }

    #[test]
    fn test_config_not_found_includes_hints() {
        let path = Path::new("/some/path/.catalog-sync.yaml");
        let message = config_not_found(path).to_string();

        assert!(message.contains("Configuration file not found"));
        assert!(message.contains("/some/path/.catalog-sync.yaml"));
        assert!(message.contains("hint:"));
        assert!(message.contains("-c/--config"));
        assert!(message.contains("CATALOG_SYNC_CONFIG"));
    }

    #[test]
    fn test_catalog_not_found_includes_hints() {
        let message = catalog_not_found(Path::new("locales/xx.json")).to_string();
        assert!(message.contains("Catalog file not found: locales/xx.json"));
        assert!(message.contains("{}"));
    }

    #[test]
    fn test_source_excerpt_marks_line_and_column() {
        let text = "{\n  \"a\": \"1\",\n  \"b\" \"2\"\n}\n";
        let location = Location {
            offset: 0,
            line: 3,
            column: 7,
        };
        let excerpt = source_excerpt(text, &location);
        assert_eq!(
            excerpt,
            "      1 | {\n      2 |   \"a\": \"1\",\n>>    3 |   \"b\" \"2\"\n        |       ^\n      4 | }\n"
        );
    }

    #[test]
    fn test_source_excerpt_empty_text() {
        assert_eq!(source_excerpt("", &Location::default()), "");
    }

    #[test]
    fn test_similar_key_same_parent_only() {
        let candidates = vec![kp("nav.titel"), kp("footer.title"), kp("nav.home")];
        assert_eq!(similar_key(&kp("nav.title"), &candidates), Some(&kp("nav.titel")));
        assert_eq!(similar_key(&kp("footer.titles"), &candidates), Some(&kp("footer.title")));
        assert_eq!(similar_key(&kp("nav.signIn"), &candidates), None);
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("title", "title"), 0);
        assert_eq!(edit_distance("titel", "title"), 2);
        assert_eq!(edit_distance("titl", "title"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("标题", "标"), 1);
    }
}
