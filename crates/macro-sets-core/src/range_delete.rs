//! Bulk deletion of host macros by index range.

use crate::host::MacroHost;
use crate::slots::SlotRange;
use tracing::debug;

/// Delete every macro with an index in `range`.
///
/// Indices are visited in increasing order and each one is queried exactly once. Empty slots are
/// skipped and the scan continues to `range.end`; a run of misses does not end it early. Returns
/// the number of macros deleted.
pub fn delete_macros_in_range<H>(host: &mut H, range: SlotRange) -> usize
where
    H: MacroHost + ?Sized,
{
    let mut deleted = 0;
    for index in range.indices() {
        if host.get_macro_info(index).is_some() {
            host.delete_macro(index);
            deleted += 1;
        }
    }
    debug!(start = range.start, end = range.end, deleted, "deleted macros in range");
    deleted
}
