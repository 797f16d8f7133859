//! Persisted data model: macro records, macro sets and the saved-variables table.

use crate::deep_copy::DeepCopy;
use crate::slots::SlotScope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Icon reference of a macro: either a texture file id or a texture path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MacroIcon {
    /// Numeric texture file id.
    FileId(u32),
    /// Texture path or name.
    Texture(String),
}

impl MacroIcon {
    /// The question-mark icon. A macro using it gets its icon from the first spell in its body.
    pub const DYNAMIC: MacroIcon = MacroIcon::FileId(134400);
}

impl Default for MacroIcon {
    fn default() -> Self {
        Self::DYNAMIC
    }
}

impl fmt::Display for MacroIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroIcon::FileId(id) => write!(f, "{}", id),
            MacroIcon::Texture(path) => write!(f, "{}", path),
        }
    }
}

/// Content of one host macro slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRecord {
    /// Macro name (as shown in the macro frame).
    pub name: String,
    /// Icon.
    #[serde(default)]
    pub icon: MacroIcon,
    /// Macro text.
    #[serde(default)]
    pub body: String,
    /// Whether the macro was captured from the character-specific partition.
    #[serde(default)]
    pub per_character: bool,
}

impl MacroRecord {
    /// Create a general (account-wide) macro record.
    pub fn new(name: impl Into<String>, icon: MacroIcon, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon,
            body: body.into(),
            per_character: false,
        }
    }

    /// Mark the record as character-specific.
    pub fn per_character(mut self, per_character: bool) -> Self {
        self.per_character = per_character;
        self
    }
}

/// A named group of macros plus the action-bar slots each macro occupied when saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSet {
    /// Macros in capture order.
    pub macros: Vec<MacroRecord>,
    /// Partition the set was captured from, and is restored into.
    #[serde(rename = "type")]
    pub kind: SlotScope,
    /// Macro name -> action-bar slots holding it at save time.
    #[serde(default, rename = "actionBarSlots", skip_serializing_if = "BTreeMap::is_empty")]
    pub action_bar_slots: BTreeMap<String, Vec<u32>>,
}

impl MacroSet {
    /// Create a set without recorded action-bar placements.
    pub fn new(kind: SlotScope, macros: Vec<MacroRecord>) -> Self {
        Self {
            macros,
            kind,
            action_bar_slots: BTreeMap::new(),
        }
    }

    /// Recorded slots for `macro_name`, empty if none.
    pub fn slots_for(&self, macro_name: &str) -> &[u32] {
        self.action_bar_slots
            .get(macro_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Set name -> set. Ordered so that iteration and serialization are stable.
pub type MacroSetsDb = BTreeMap<String, MacroSet>;

/// User-toggleable behaviour flags, persisted with the sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Save without an explicit scope captures character macros only.
    #[serde(default)]
    pub char_specific: bool,
    /// Restore every macro with [`MacroIcon::DYNAMIC`].
    #[serde(default)]
    pub dynamic_icons: bool,
    /// Record action-bar placements on save and restore them on load.
    #[serde(default = "default_true")]
    pub replace_bars: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            char_specific: false,
            dynamic_icons: false,
            replace_bars: true,
        }
    }
}

/// The top-level persisted table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedVariables {
    /// All saved sets.
    #[serde(default)]
    pub sets: MacroSetsDb,
    /// Option flags.
    #[serde(default)]
    pub options: Options,
}

impl DeepCopy for MacroRecord {
    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl DeepCopy for MacroSet {
    fn deep_copy(&self) -> Self {
        Self {
            macros: self.macros.deep_copy(),
            kind: self.kind,
            action_bar_slots: self.action_bar_slots.clone(),
        }
    }
}

impl<T: DeepCopy> DeepCopy for Vec<T> {
    fn deep_copy(&self) -> Self {
        self.iter().map(DeepCopy::deep_copy).collect()
    }
}

impl<T: DeepCopy> DeepCopy for BTreeMap<String, T> {
    fn deep_copy(&self) -> Self {
        self.iter()
            .map(|(name, value)| (name.clone(), value.deep_copy()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_set_json_shape() {
        let mut set = MacroSet::new(
            SlotScope::General,
            vec![MacroRecord::new("Heal", MacroIcon::FileId(135907), "/cast Heal")],
        );
        set.action_bar_slots.insert("Heal".to_string(), vec![1, 13]);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["type"], "g");
        assert_eq!(json["actionBarSlots"]["Heal"][1], 13);
        assert_eq!(json["macros"][0]["icon"], 135907);

        let back: MacroSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_set_type_uses_command_tags() {
        let character: MacroSet = serde_json::from_str(r#"{"macros":[],"type":"c"}"#).unwrap();
        assert_eq!(character.kind, SlotScope::Character);
        assert!(character.macros.is_empty());

        for scope in [SlotScope::General, SlotScope::Character, SlotScope::Both] {
            let json = serde_json::to_value(MacroSet::new(scope, Vec::new())).unwrap();
            assert_eq!(json["type"], scope.tag());
            assert_eq!(SlotScope::from_tag(scope.tag()), scope);
        }

        let long_form: MacroSet =
            serde_json::from_str(r#"{"macros":[],"type":"general"}"#).unwrap();
        assert_eq!(long_form.kind, SlotScope::General);
    }

    #[test]
    fn test_saved_variables_defaults_when_fields_missing() {
        let saved: SavedVariables = serde_json::from_str("{}").unwrap();
        assert!(saved.sets.is_empty());
        assert_eq!(saved.options, Options::default());
        assert!(saved.options.replace_bars);
    }

    #[test]
    fn test_texture_icon_deserializes() {
        let record: MacroRecord =
            serde_json::from_str(r#"{"name":"x","icon":"INV_Misc_QuestionMark","body":""}"#)
                .unwrap();
        assert_eq!(record.icon, MacroIcon::Texture("INV_Misc_QuestionMark".into()));
        assert!(!record.per_character);
    }

    #[test]
    fn test_deep_copy_of_set_is_equal_and_independent() {
        let set = MacroSet::new(
            SlotScope::Character,
            vec![MacroRecord::new("A", MacroIcon::DYNAMIC, "/say a").per_character(true)],
        );
        let mut copy = set.deep_copy();
        assert_eq!(copy, set);
        copy.macros[0].body.push_str(" changed");
        assert_eq!(set.macros[0].body, "/say a");
    }
}
