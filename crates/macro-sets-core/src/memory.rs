//! A simulated macro host.
//!
//! [`InMemoryHost`] keeps macro slots and action-bar slots in ordered maps and counts every host
//! call, so tests can assert on the exact interaction pattern of an operation. The CLI front end
//! uses it as its backing "game client".
//!
//! Simplifications compared to a real client: macro indices never shift after a deletion, and
//! [`MacroHost::create_macro`] takes the lowest free index of the requested partition.

use crate::config::StoreConfig;
use crate::host::{ActionInfo, ActionKind, MacroHost, MacroInfo};
use crate::model::MacroIcon;
use crate::slots::SlotScope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-primitive call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCalls {
    /// `get_macro_info` calls.
    pub get_macro_info: usize,
    /// `delete_macro` calls.
    pub delete_macro: usize,
    /// `pickup_macro` calls.
    pub pickup_macro: usize,
    /// `place_action` calls.
    pub place_action: usize,
    /// `clear_cursor` calls.
    pub clear_cursor: usize,
    /// `get_action_info` calls.
    pub get_action_info: usize,
    /// `create_macro` calls.
    pub create_macro: usize,
}

/// Serializable contents of an [`InMemoryHost`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostLayout {
    /// Macro index -> macro.
    #[serde(default)]
    pub macros: BTreeMap<u32, MacroInfo>,
    /// Action-bar slot -> action.
    #[serde(default)]
    pub actions: BTreeMap<u32, ActionInfo>,
}

/// In-memory [`MacroHost`].
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    macros: BTreeMap<u32, MacroInfo>,
    actions: BTreeMap<u32, ActionInfo>,
    cursor: Option<ActionInfo>,
    slot_limit: u32,
    calls: HostCalls,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl InMemoryHost {
    /// Create an empty host.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            macros: BTreeMap::new(),
            actions: BTreeMap::new(),
            cursor: None,
            slot_limit: config.action_bar_slot_limit,
            calls: HostCalls::default(),
        }
    }

    /// Create a host pre-populated from `layout`.
    pub fn from_layout(layout: HostLayout, config: StoreConfig) -> Self {
        let mut host = Self::new(config);
        host.macros = layout.macros;
        host.actions = layout.actions;
        host
    }

    /// Current contents, for persisting.
    pub fn layout(&self) -> HostLayout {
        HostLayout {
            macros: self.macros.clone(),
            actions: self.actions.clone(),
        }
    }

    /// Put a macro directly into slot `index`, replacing any existing one.
    pub fn insert_macro(&mut self, index: u32, info: MacroInfo) {
        self.macros.insert(index, info);
    }

    /// Put an action directly into action-bar `slot`.
    pub fn set_action(&mut self, slot: u32, action: ActionInfo) {
        self.actions.insert(slot, action);
    }

    /// The macro in slot `index`, without counting a host call.
    pub fn macro_at(&self, index: u32) -> Option<&MacroInfo> {
        self.macros.get(&index)
    }

    /// The action in `slot`, without counting a host call.
    pub fn action_at(&self, slot: u32) -> Option<&ActionInfo> {
        self.actions.get(&slot)
    }

    /// Macros in index order.
    pub fn macros(&self) -> impl Iterator<Item = (u32, &MacroInfo)> {
        self.macros.iter().map(|(index, info)| (*index, info))
    }

    /// What is currently on the cursor.
    pub fn cursor(&self) -> Option<&ActionInfo> {
        self.cursor.as_ref()
    }

    /// Call counters since creation or the last [`reset_calls`](Self::reset_calls).
    pub fn calls(&self) -> HostCalls {
        self.calls
    }

    /// Reset the call counters.
    pub fn reset_calls(&mut self) {
        self.calls = HostCalls::default();
    }

    fn count_in(&self, scope: SlotScope) -> usize {
        let range = scope.range();
        self.macros.keys().filter(|index| range.contains(**index)).count()
    }
}

impl MacroHost for InMemoryHost {
    fn get_macro_info(&mut self, index: u32) -> Option<MacroInfo> {
        self.calls.get_macro_info += 1;
        self.macros.get(&index).cloned()
    }

    fn delete_macro(&mut self, index: u32) {
        self.calls.delete_macro += 1;
        if self.macros.remove(&index).is_some() {
            // Action bars drop references to a deleted macro.
            self.actions
                .retain(|_, action| !(action.kind == ActionKind::Macro && action.id == index));
        }
    }

    fn pickup_macro(&mut self, index: u32) {
        self.calls.pickup_macro += 1;
        self.cursor = self
            .macros
            .contains_key(&index)
            .then(|| ActionInfo::macro_at(index));
    }

    fn place_action(&mut self, slot: u32) {
        self.calls.place_action += 1;
        if let Some(action) = self.cursor.take() {
            // The previous occupant ends up on the cursor.
            self.cursor = self.actions.insert(slot, action);
        }
    }

    fn clear_cursor(&mut self) {
        self.calls.clear_cursor += 1;
        self.cursor = None;
    }

    fn get_action_info(&mut self, slot: u32) -> Option<ActionInfo> {
        self.calls.get_action_info += 1;
        self.actions.get(&slot).cloned()
    }

    fn create_macro(
        &mut self,
        name: &str,
        icon: &MacroIcon,
        body: &str,
        per_character: bool,
    ) -> Option<u32> {
        self.calls.create_macro += 1;
        let scope = if per_character {
            SlotScope::Character
        } else {
            SlotScope::General
        };
        let index = scope
            .range()
            .indices()
            .find(|index| !self.macros.contains_key(index))?;
        self.macros
            .insert(index, MacroInfo::new(name, icon.clone(), body));
        Some(index)
    }

    fn num_macros(&mut self) -> (usize, usize) {
        (
            self.count_in(SlotScope::General),
            self.count_in(SlotScope::Character),
        )
    }

    fn action_bar_slot_limit(&self) -> u32 {
        self.slot_limit
    }
}
