//! Normalization of raw search input for the exact-match puzzle fields.

use crate::schema::PUZZLE_LETTER_COUNT;

/// Cleans a raw search term before it is split or normalized.
///
/// Surrounding single quotes and whitespace are removed. Double quotes are
/// kept since they mark exact phrases.
pub fn sanitize_term(raw: &str) -> String {
    raw.trim_matches('\'').trim().to_string()
}

/// Normalizes a query for comparison against the indexed date renderings.
///
/// Lower-cases, drops ASCII punctuation and collapses whitespace, so
/// `"December 31, 2024"` becomes `"december 31 2024"`.
pub fn normalize_date_query(query: &str) -> String {
    let stripped: String = query
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a query into the sorted-letters key of a puzzle, if it can be one.
///
/// Whitespace is removed and the remaining characters are upper-cased and
/// sorted. Returns `None` unless exactly seven distinct letters remain.
pub fn normalize_letters_query(query: &str) -> Option<String> {
    let mut letters: Vec<char> = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if letters.len() != PUZZLE_LETTER_COUNT || !letters.iter().all(char::is_ascii_alphabetic) {
        return None;
    }

    letters.sort_unstable();
    let before = letters.len();
    letters.dedup();
    if letters.len() != before {
        return None;
    }

    Some(letters.into_iter().collect())
}

/// Sorts and upper-cases a puzzle's letters into its `letters` key.
///
/// Used on the write path so documents and queries agree on the key.
pub fn letters_key(center: &str, outer: &str) -> String {
    let mut letters: Vec<char> = center
        .chars()
        .chain(outer.chars())
        .flat_map(char::to_uppercase)
        .collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}
