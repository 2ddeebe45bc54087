//! Utility functions for string processing.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics: NFD-decompose, then drop combining marks.
///
/// - "límite" → "limite"
/// - "Señor" → "Senor"
/// - "naïve" → "naive"
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a string for indexing: strip diacritics, lowercase, and collapse whitespace.
///
/// This lets "Abogacía" and "abogacia" land on the same term.
pub fn normalize(value: &str) -> String {
    collapse_whitespace(&strip_diacritics(value).to_lowercase())
}

/// Length in characters, which is what every length threshold counts.
#[inline]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
