//! Leaf value generators
//!
//! When a key exists in the reference catalog but not in a target, `merge`
//! has to invent a value for it. A [`LeafGenerator`] derives that value from
//! the key path. The default, [`TitleCase`], turns the last segment into a
//! human-readable label (`foundCount` → `Found Count`), which keeps the UI
//! legible until a translator fills in the real text.

use serde::{Deserialize, Serialize};

use crate::path::KeyPath;

/// Produces a value for a key that has to be created.
pub trait LeafGenerator: Sync {
    fn generate(&self, path: &KeyPath) -> String;
}

impl<F> LeafGenerator for F
where
    F: Fn(&KeyPath) -> String + Sync,
{
    fn generate(&self, path: &KeyPath) -> String {
        self(path)
    }
}

/// Title-cased label built from the last path segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitleCase;

impl LeafGenerator for TitleCase {
    fn generate(&self, path: &KeyPath) -> String {
        path.last().map(title_case_label).unwrap_or_default()
    }
}

/// Title-cased label behind a fixed prefix, e.g. `[ZH] Found Count`.
#[derive(Clone, Debug)]
pub struct Prefixed {
    pub prefix: String,
}

impl LeafGenerator for Prefixed {
    fn generate(&self, path: &KeyPath) -> String {
        format!("{}{}", self.prefix, TitleCase.generate(path))
    }
}

/// A marker followed by the full dotted path, e.g. `[MISSING] events.title`.
#[derive(Clone, Debug)]
pub struct MissingMarker {
    pub marker: String,
}

impl Default for MissingMarker {
    fn default() -> Self {
        Self {
            marker: "[MISSING]".to_string(),
        }
    }
}

impl LeafGenerator for MissingMarker {
    fn generate(&self, path: &KeyPath) -> String {
        format!("{} {}", self.marker, path)
    }
}

/// The same value for every key, e.g. `TODO`.
#[derive(Clone, Debug)]
pub struct Fixed(pub String);

impl LeafGenerator for Fixed {
    fn generate(&self, _path: &KeyPath) -> String {
        self.0.clone()
    }
}

/// Split a key on case boundaries and separators and capitalize each word.
///
/// ```
/// use catalog_sync::generate::title_case_label;
///
/// assert_eq!(title_case_label("foundCount"), "Found Count");
/// assert_eq!(title_case_label("au_pair"), "Au Pair");
/// assert_eq!(title_case_label("HTMLParser"), "HTML Parser");
/// ```
pub fn title_case_label(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if matches!(ch, '_' | '-' | '.') || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let lower_to_upper = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end = prev.is_uppercase() && next_is_lower;
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Which generator to use, as selected in configuration or on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorStyle {
    /// Title-cased label from the last key segment
    #[default]
    TitleCase,
    /// Title-cased label behind a prefix
    Prefixed,
    /// Marker text followed by the full key path
    Marker,
    /// A constant value
    Fixed,
}

/// A serializable generator selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    #[serde(default)]
    pub style: GeneratorStyle,
    /// Prefix, marker or constant, depending on `style`.
    #[serde(default)]
    pub value: Option<String>,
}

impl GeneratorSpec {
    pub fn new(style: GeneratorStyle, value: Option<String>) -> Self {
        Self { style, value }
    }

    /// Instantiate the selected generator.
    pub fn build(&self) -> Box<dyn LeafGenerator> {
        match self.style {
            GeneratorStyle::TitleCase => Box::new(TitleCase),
            GeneratorStyle::Prefixed => Box::new(Prefixed {
                prefix: self.value.clone().unwrap_or_default(),
            }),
            GeneratorStyle::Marker => match &self.value {
                Some(marker) => Box::new(MissingMarker {
                    marker: marker.clone(),
                }),
                None => Box::new(MissingMarker::default()),
            },
            GeneratorStyle::Fixed => {
                Box::new(Fixed(self.value.clone().unwrap_or_else(|| "TODO".to_string())))
            }
        }
    }
}
