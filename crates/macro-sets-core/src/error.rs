use crate::naming::MAX_SET_NAME_LEN;
use crate::slots::SlotScope;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures of macro-set operations.
///
/// None of these are fatal: each aborts (or, for [`MacroSetError::SlotOutOfRange`] and
/// [`MacroSetError::MacroSlotsFull`], skips one item of) a single operation and leaves the stored
/// sets consistent.
pub enum MacroSetError {
    #[error(
        "invalid set name '{0}': use 1-{max} letters, digits, '_' or '-'",
        max = MAX_SET_NAME_LEN
    )]
    /// The proposed set name is empty, too long or contains forbidden characters.
    InvalidSetName(String),

    #[error(
        "cannot save '{set}': duplicate macro names in {scope} macros ({})",
        .duplicates.join(", ")
    )]
    /// Two or more macros in the captured range share a name.
    DuplicateMacroNames {
        /// The set being saved.
        set: String,
        /// The scope that was scanned.
        scope: SlotScope,
        /// Names occurring more than once.
        duplicates: Vec<String>,
    },

    #[error("cannot save '{set}': no {scope} macros to save")]
    /// The captured range holds no macros.
    EmptyScope {
        /// The set being saved.
        set: String,
        /// The scope that was scanned.
        scope: SlotScope,
    },

    #[error("macro set '{0}' not found")]
    /// No set is stored under the given name.
    SetNotFound(String),

    #[error("nothing to undo")]
    /// No snapshot is available.
    NothingToUndo,

    #[error("action bar slot {slot} is out of range (1-{limit})")]
    /// A requested action-bar slot lies outside `[1, limit]`.
    SlotOutOfRange {
        /// The requested slot.
        slot: u32,
        /// The host's slot limit.
        limit: u32,
    },

    #[error("no free {scope} macro slot for '{name}'")]
    /// The host refused to create a macro because its partition is full.
    MacroSlotsFull {
        /// Macro name.
        name: String,
        /// Partition that was full.
        scope: SlotScope,
    },
}
