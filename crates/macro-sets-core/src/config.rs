//! Host-facing configuration.

use serde::{Deserialize, Serialize};

/// Action-bar slot limit of the retail client.
pub const DEFAULT_ACTION_BAR_SLOT_LIMIT: u32 = 180;

/// Configuration of the simulated host and of placement bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Highest valid action-bar slot index (slots are `1..=limit`).
    pub action_bar_slot_limit: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            action_bar_slot_limit: DEFAULT_ACTION_BAR_SLOT_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Override the action-bar slot limit.
    pub fn with_action_bar_slot_limit(mut self, limit: u32) -> Self {
        self.action_bar_slot_limit = limit;
        self
    }
}
