//! Host collaborator interfaces.
//!
//! The macro-set engine never talks to a game client directly. It drives two narrow interfaces:
//!
//! - [`MacroHost`]: macro slot metadata plus the pickup/place primitives used to fill action bars.
//! - [`MessageSink`]: user-visible output (chat-frame print).
//!
//! [`InMemoryHost`](crate::memory::InMemoryHost) is a complete simulated host.

use crate::model::{MacroIcon, MacroRecord};
use crate::slots::SlotScope;
use serde::{Deserialize, Serialize};

/// Metadata of one macro slot as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroInfo {
    /// Macro name.
    pub name: String,
    /// Icon.
    pub icon: MacroIcon,
    /// Macro text.
    pub body: String,
}

impl MacroInfo {
    /// Create macro metadata.
    pub fn new(name: impl Into<String>, icon: MacroIcon, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon,
            body: body.into(),
        }
    }

    /// Convert into a record captured from macro slot `index`.
    pub fn into_record(self, index: u32) -> MacroRecord {
        MacroRecord {
            name: self.name,
            icon: self.icon,
            body: self.body,
            per_character: SlotScope::of_index(index) == SlotScope::Character,
        }
    }
}

/// What an action-bar slot holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// A macro; the action id is the macro index.
    Macro,
    /// A spell.
    Spell,
    /// An item.
    Item,
    /// Anything else the host reports.
    Other(String),
}

/// Contents of one action-bar slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Action kind.
    pub kind: ActionKind,
    /// Kind-specific id.
    pub id: u32,
}

impl ActionInfo {
    /// A macro action referring to macro slot `index`.
    pub fn macro_at(index: u32) -> Self {
        Self {
            kind: ActionKind::Macro,
            id: index,
        }
    }
}

/// The game client's macro and action-bar API.
///
/// Macro indices are 1-based. Absence (`None`) is a normal miss, never an error.
pub trait MacroHost {
    /// Metadata of macro slot `index`, or `None` when the slot is empty.
    fn get_macro_info(&mut self, index: u32) -> Option<MacroInfo>;

    /// Delete the macro in slot `index`.
    fn delete_macro(&mut self, index: u32);

    /// Put the macro in slot `index` on the cursor.
    fn pickup_macro(&mut self, index: u32);

    /// Drop the cursor contents into action-bar `slot`.
    fn place_action(&mut self, slot: u32);

    /// Clear whatever is on the cursor.
    fn clear_cursor(&mut self);

    /// Contents of action-bar `slot`, or `None` when empty.
    fn get_action_info(&mut self, slot: u32) -> Option<ActionInfo>;

    /// Create a macro in the general or character partition.
    ///
    /// Returns the new macro index, or `None` when the partition is full.
    fn create_macro(
        &mut self,
        name: &str,
        icon: &MacroIcon,
        body: &str,
        per_character: bool,
    ) -> Option<u32>;

    /// Number of `(general, character)` macros currently defined.
    fn num_macros(&mut self) -> (usize, usize);

    /// Highest valid action-bar slot index.
    fn action_bar_slot_limit(&self) -> u32;
}

/// Destination of user-visible messages.
pub trait MessageSink {
    /// Print one line.
    fn print(&mut self, message: &str);
}

impl MessageSink for Vec<String> {
    fn print(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

impl<T: MessageSink + ?Sized> MessageSink for &mut T {
    fn print(&mut self, message: &str) {
        (**self).print(message);
    }
}

impl<T: MacroHost + ?Sized> MacroHost for &mut T {
    fn get_macro_info(&mut self, index: u32) -> Option<MacroInfo> {
        (**self).get_macro_info(index)
    }

    fn delete_macro(&mut self, index: u32) {
        (**self).delete_macro(index)
    }

    fn pickup_macro(&mut self, index: u32) {
        (**self).pickup_macro(index)
    }

    fn place_action(&mut self, slot: u32) {
        (**self).place_action(slot)
    }

    fn clear_cursor(&mut self) {
        (**self).clear_cursor()
    }

    fn get_action_info(&mut self, slot: u32) -> Option<ActionInfo> {
        (**self).get_action_info(slot)
    }

    fn create_macro(
        &mut self,
        name: &str,
        icon: &MacroIcon,
        body: &str,
        per_character: bool,
    ) -> Option<u32> {
        (**self).create_macro(name, icon, body, per_character)
    }

    fn num_macros(&mut self) -> (usize, usize) {
        (**self).num_macros()
    }

    fn action_bar_slot_limit(&self) -> u32 {
        (**self).action_bar_slot_limit()
    }
}
