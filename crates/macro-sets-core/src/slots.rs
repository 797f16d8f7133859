//! Macro slot partitioning.
//!
//! The host exposes a fixed, 1-based macro index space. The low part is shared by every
//! character on the account ("general" macros), the high part belongs to the current character.
//!
//! ```text
//!   1 ............ 120 | 121 ...... 150
//!   general (account)  | character
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// First general macro index.
pub const GENERAL_FIRST: u32 = 1;
/// Last general macro index.
pub const GENERAL_LAST: u32 = 120;
/// First character-specific macro index.
pub const CHARACTER_FIRST: u32 = 121;
/// Last character-specific macro index.
pub const CHARACTER_LAST: u32 = 150;

/// Which partition of the macro index space an operation addresses.
///
/// Persisted with the same short tags the command line uses ([`SlotScope::tag`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotScope {
    /// Account-wide macros (`"g"`).
    #[serde(rename = "g", alias = "general")]
    General,
    /// Character-specific macros (`"c"`).
    #[serde(rename = "c", alias = "character")]
    Character,
    /// The whole index space (`"both"` or anything unrecognized).
    #[serde(rename = "both")]
    Both,
}

impl SlotScope {
    /// Parse a scope tag. Total: unknown tags degrade to [`SlotScope::Both`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "g" => SlotScope::General,
            "c" => SlotScope::Character,
            _ => SlotScope::Both,
        }
    }

    /// The short tag used on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            SlotScope::General => "g",
            SlotScope::Character => "c",
            SlotScope::Both => "both",
        }
    }

    /// The macro index range owned by this scope.
    pub fn range(self) -> SlotRange {
        match self {
            SlotScope::General => SlotRange::new(GENERAL_FIRST, GENERAL_LAST),
            SlotScope::Character => SlotRange::new(CHARACTER_FIRST, CHARACTER_LAST),
            SlotScope::Both => SlotRange::new(GENERAL_FIRST, CHARACTER_LAST),
        }
    }

    /// Scope owning a single macro index.
    pub fn of_index(index: u32) -> Self {
        if index >= CHARACTER_FIRST {
            SlotScope::Character
        } else {
            SlotScope::General
        }
    }
}

impl fmt::Display for SlotScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotScope::General => write!(f, "general"),
            SlotScope::Character => write!(f, "character"),
            SlotScope::Both => write!(f, "general + character"),
        }
    }
}

/// An inclusive `[start, end]` range of macro indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRange {
    /// First index (inclusive).
    pub start: u32,
    /// Last index (inclusive).
    pub end: u32,
}

impl SlotRange {
    /// Create a new inclusive range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Iterate the indices in increasing order.
    pub fn indices(self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Whether `index` lies in the range.
    pub fn contains(self, index: u32) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Number of indices in the range.
    pub fn len(self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }

    /// Whether the range is empty.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Resolve a scope tag to its `(start, end)` macro index range.
///
/// `"g"` -> `(1, 120)`, `"c"` -> `(121, 150)`, anything else -> `(1, 150)`.
pub fn resolve_slot_range(scope: &str) -> (u32, u32) {
    let range = SlotScope::from_tag(scope).range();
    (range.start, range.end)
}

/// Whether the host holds no macros in `scope`, given its per-partition macro counts.
pub fn is_macro_set_empty(num_general: usize, num_character: usize, scope: SlotScope) -> bool {
    match scope {
        SlotScope::General => num_general == 0,
        SlotScope::Character => num_character == 0,
        SlotScope::Both => num_general == 0 && num_character == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slot_range() {
        assert_eq!(resolve_slot_range("g"), (1, 120));
        assert_eq!(resolve_slot_range("c"), (121, 150));
        assert_eq!(resolve_slot_range("both"), (1, 150));
        assert_eq!(resolve_slot_range("unknown"), (1, 150));
        assert_eq!(resolve_slot_range(""), (1, 150));
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover_both() {
        let general = SlotScope::General.range();
        let character = SlotScope::Character.range();
        let both = SlotScope::Both.range();
        assert_eq!(general.end + 1, character.start);
        assert_eq!(general.len() + character.len(), both.len());
        assert!(both.contains(general.start) && both.contains(character.end));
    }

    #[test]
    fn test_scope_of_index() {
        assert_eq!(SlotScope::of_index(1), SlotScope::General);
        assert_eq!(SlotScope::of_index(120), SlotScope::General);
        assert_eq!(SlotScope::of_index(121), SlotScope::Character);
    }

    #[test]
    fn test_is_macro_set_empty() {
        assert!(is_macro_set_empty(0, 0, SlotScope::General));
        assert!(is_macro_set_empty(0, 0, SlotScope::Character));
        assert!(is_macro_set_empty(0, 0, SlotScope::Both));
        assert!(!is_macro_set_empty(0, 5, SlotScope::Character));
        assert!(!is_macro_set_empty(5, 0, SlotScope::General));
        assert!(!is_macro_set_empty(5, 5, SlotScope::Both));
        // Only the addressed partition matters.
        assert!(is_macro_set_empty(5, 0, SlotScope::Character));
    }
}
