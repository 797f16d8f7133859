//! Action-bar placement and reverse lookup.

use crate::error::MacroSetError;
use crate::host::{ActionKind, MacroHost, MessageSink};
use tracing::{trace, warn};

/// Outcome of [`place_macro_in_action_bar_slots`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Slots the macro was placed into, in request order.
    pub placed: Vec<u32>,
    /// Slots rejected for being outside `[1, limit]`, in request order.
    pub rejected: Vec<u32>,
}

impl PlacementReport {
    /// Whether every requested slot was filled.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Place macro `macro_index` into each of `slots`.
///
/// Slots are handled independently: an out-of-range slot is reported through `sink` and skipped,
/// and processing continues with the next one. For every in-range slot the host sees exactly one
/// pickup, one place and one clear-cursor call. The macro metadata is fetched once per call, before
/// any slot is examined. If the macro slot is empty nothing is placed.
pub fn place_macro_in_action_bar_slots<H, S>(
    host: &mut H,
    sink: &mut S,
    macro_index: u32,
    slots: &[u32],
) -> PlacementReport
where
    H: MacroHost + ?Sized,
    S: MessageSink + ?Sized,
{
    let mut report = PlacementReport::default();
    let info = host.get_macro_info(macro_index);
    let limit = host.action_bar_slot_limit();

    for &slot in slots {
        if slot < 1 || slot > limit {
            sink.print(&MacroSetError::SlotOutOfRange { slot, limit }.to_string());
            report.rejected.push(slot);
            continue;
        }
        let Some(info) = info.as_ref() else {
            continue;
        };
        host.pickup_macro(macro_index);
        host.place_action(slot);
        host.clear_cursor();
        trace!(macro_name = %info.name, macro_index, slot, "placed macro");
        report.placed.push(slot);
    }

    if info.is_none() && !slots.is_empty() {
        warn!(macro_index, "no macro to place");
    }
    report
}

/// Action-bar slots (in increasing order) currently holding the macro named `macro_name`.
///
/// Scans `1..=limit`; a slot matches when it holds a macro action whose macro resolves to
/// `macro_name`. Returns an empty vector if the macro is on no bar or does not exist.
pub fn action_bar_slots_for_macro<H>(host: &mut H, macro_name: &str) -> Vec<u32>
where
    H: MacroHost + ?Sized,
{
    let limit = host.action_bar_slot_limit();
    let mut slots = Vec::new();
    for slot in 1..=limit {
        let Some(action) = host.get_action_info(slot) else {
            continue;
        };
        if action.kind != ActionKind::Macro {
            continue;
        }
        if host
            .get_macro_info(action.id)
            .is_some_and(|info| info.name == macro_name)
        {
            slots.push(slot);
        }
    }
    slots
}
