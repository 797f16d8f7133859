//! Set-name validation and duplicate macro-name detection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Longest accepted set name, in bytes (names are ASCII-only, so bytes == characters).
pub const MAX_SET_NAME_LEN: usize = 32;

static SET_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid set-name regex"));

/// Whether `name` is acceptable as a macro-set key.
///
/// A valid name is non-empty, at most [`MAX_SET_NAME_LEN`] characters long and consists only of
/// ASCII letters, digits, `_` and `-`.
pub fn is_valid_set_name(name: &str) -> bool {
    name.len() <= MAX_SET_NAME_LEN && SET_NAME_PATTERN.is_match(name)
}

/// Whether any name occurs more than once. Comparison is exact and case-sensitive.
pub fn has_duplicate_names<I, S>(names: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_ref().to_string()) {
            return true;
        }
    }
    false
}

/// Names occurring more than once, each listed once, in order of their second occurrence.
pub fn duplicate_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for name in names {
        let name = name.as_ref();
        if !seen.insert(name.to_string()) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}
