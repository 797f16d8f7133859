//! Macro-set lifecycle: save, load, delete, undo and listing.
//!
//! [`MacroSetStore`] owns the persisted [`SavedVariables`] table, the single-level undo snapshot
//! and the injected host collaborators. Every operation runs to completion synchronously.
//!
//! Ordering rule: every operation validates its input before touching stored state, so a failed
//! operation never leaves the set database half-modified. Destructive operations (delete, delete
//! all) snapshot the whole database first; [`MacroSetStore::undo_last_operation`] puts back the
//! snapshot's sets that are missing from the database and consumes the snapshot.
//!
//! # Example
//!
//! ```rust
//! use macro_sets_core::{InMemoryHost, MacroIcon, MacroInfo, MacroSetStore, SlotScope};
//!
//! let mut host = InMemoryHost::default();
//! host.insert_macro(1, MacroInfo::new("Heal", MacroIcon::DYNAMIC, "/cast Heal"));
//!
//! let mut store = MacroSetStore::new(host, Vec::<String>::new());
//! store.save_macro_set("healing", Some(SlotScope::General)).unwrap();
//! assert_eq!(store.sets()["healing"].macros.len(), 1);
//!
//! store.delete_macro_set("healing");
//! assert!(store.sets().is_empty());
//! store.undo_last_operation().unwrap();
//! assert!(store.sets().contains_key("healing"));
//! ```

use crate::deep_copy::DeepCopy;
use crate::error::MacroSetError;
use crate::host::{MacroHost, MessageSink};
use crate::model::{MacroIcon, MacroSet, MacroSetsDb, Options, SavedVariables};
use crate::naming::{duplicate_names, is_valid_set_name};
use crate::placement::{action_bar_slots_for_macro, place_macro_in_action_bar_slots};
use crate::range_delete::delete_macros_in_range;
use crate::slots::{SlotScope, is_macro_set_empty};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Number of macros captured.
    pub macros: usize,
    /// Scope that was captured.
    pub scope: SlotScope,
    /// Whether an existing set of the same name was overwritten.
    pub replaced: bool,
}

/// Result of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Host macros removed from the set's range before restoring.
    pub cleared: usize,
    /// Macros created.
    pub created: usize,
    /// Macros the host had no free slot for.
    pub failed: Vec<String>,
    /// Action-bar slots filled.
    pub placed: usize,
    /// Recorded action-bar slots rejected as out of range.
    pub rejected_slots: usize,
}

/// Macro-set database plus the operations on it.
pub struct MacroSetStore<H, S> {
    host: H,
    sink: S,
    saved: SavedVariables,
    undo: Option<MacroSetsDb>,
    sorted_set_names: Vec<String>,
}

impl<H: MacroHost, S: MessageSink> MacroSetStore<H, S> {
    /// Create a store with an empty database and default options.
    pub fn new(host: H, sink: S) -> Self {
        Self::with_saved(host, sink, SavedVariables::default())
    }

    /// Create a store over previously persisted state.
    pub fn with_saved(host: H, sink: S, saved: SavedVariables) -> Self {
        Self {
            host,
            sink,
            saved,
            undo: None,
            sorted_set_names: Vec::new(),
        }
    }

    /// The host collaborator.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host collaborator.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The message sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the message sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// All stored sets.
    pub fn sets(&self) -> &MacroSetsDb {
        &self.saved.sets
    }

    /// Mutable access to the stored sets, bypassing validation and undo.
    pub fn sets_mut(&mut self) -> &mut MacroSetsDb {
        &mut self.saved.sets
    }

    /// The full persisted table.
    pub fn saved(&self) -> &SavedVariables {
        &self.saved
    }

    /// Consume the store, returning the persisted table.
    pub fn into_saved(self) -> SavedVariables {
        self.saved
    }

    /// Current option flags.
    pub fn options(&self) -> Options {
        self.saved.options
    }

    /// The pending undo snapshot, if any.
    pub fn undo_snapshot(&self) -> Option<&MacroSetsDb> {
        self.undo.as_ref()
    }

    /// Whether [`undo_last_operation`](Self::undo_last_operation) would succeed.
    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Set names as of the last [`alphabetize_macro_sets`](Self::alphabetize_macro_sets) call.
    pub fn sorted_set_names(&self) -> &[String] {
        &self.sorted_set_names
    }

    /// Snapshot every set into the undo buffer, replacing any previous snapshot.
    ///
    /// Returns the number of sets copied.
    pub fn backup_macro_sets(&mut self) -> usize {
        let snapshot: MacroSetsDb = self
            .saved
            .sets
            .iter()
            .map(|(name, set)| (name.clone(), set.deep_copy()))
            .collect();
        let copied = snapshot.len();
        self.undo = Some(snapshot);
        debug!(copied, "backed up macro sets");
        copied
    }

    /// Capture the host macros of `scope` as set `name`.
    ///
    /// `None` selects the default scope: character macros when the `char_specific` option is on,
    /// otherwise both partitions. Fails without modifying anything if the name is invalid, the
    /// scope holds no macros, or two captured macros share a name.
    pub fn save_macro_set(
        &mut self,
        name: &str,
        scope: Option<SlotScope>,
    ) -> Result<SaveOutcome, MacroSetError> {
        if !is_valid_set_name(name) {
            return self.fail(MacroSetError::InvalidSetName(name.to_string()));
        }
        let scope = scope.unwrap_or(if self.saved.options.char_specific {
            SlotScope::Character
        } else {
            SlotScope::Both
        });

        let (num_general, num_character) = self.host.num_macros();
        if is_macro_set_empty(num_general, num_character, scope) {
            return self.fail(MacroSetError::EmptyScope {
                set: name.to_string(),
                scope,
            });
        }

        let macros: Vec<_> = scope
            .range()
            .indices()
            .filter_map(|index| {
                self.host
                    .get_macro_info(index)
                    .map(|info| info.into_record(index))
            })
            .collect();

        let duplicates = duplicate_names(macros.iter().map(|record| &record.name));
        if !duplicates.is_empty() {
            return self.fail(MacroSetError::DuplicateMacroNames {
                set: name.to_string(),
                scope,
                duplicates,
            });
        }

        let mut action_bar_slots = BTreeMap::new();
        if self.saved.options.replace_bars {
            for record in &macros {
                let slots = action_bar_slots_for_macro(&mut self.host, &record.name);
                if !slots.is_empty() {
                    action_bar_slots.insert(record.name.clone(), slots);
                }
            }
        }

        let outcome = SaveOutcome {
            macros: macros.len(),
            scope,
            replaced: self.saved.sets.contains_key(name),
        };
        self.saved.sets.insert(
            name.to_string(),
            MacroSet {
                macros,
                kind: scope,
                action_bar_slots,
            },
        );
        debug!(set = name, macros = outcome.macros, %scope, "saved macro set");
        self.sink.print(&format!(
            "Saved macro set '{}' ({} {} macros).",
            name, outcome.macros, scope
        ));
        Ok(outcome)
    }

    /// Restore set `name` into the host.
    ///
    /// The set's slot range is cleared first, then each macro is recreated in order. When the
    /// `replace_bars` option is on, each recreated macro is placed into its recorded action-bar
    /// slots. A macro the host has no room for is reported and skipped.
    pub fn load_macro_set(&mut self, name: &str) -> Result<LoadOutcome, MacroSetError> {
        let Some(set) = self.saved.sets.get(name).map(DeepCopy::deep_copy) else {
            return self.fail(MacroSetError::SetNotFound(name.to_string()));
        };
        let options = self.saved.options;
        let mut outcome = LoadOutcome {
            cleared: delete_macros_in_range(&mut self.host, set.kind.range()),
            ..LoadOutcome::default()
        };

        for record in &set.macros {
            let icon = if options.dynamic_icons {
                MacroIcon::DYNAMIC
            } else {
                record.icon.clone()
            };
            let per_character = match set.kind {
                SlotScope::General => false,
                SlotScope::Character => true,
                SlotScope::Both => record.per_character,
            };
            let Some(index) =
                self.host
                    .create_macro(&record.name, &icon, &record.body, per_character)
            else {
                let err = MacroSetError::MacroSlotsFull {
                    name: record.name.clone(),
                    scope: if per_character {
                        SlotScope::Character
                    } else {
                        SlotScope::General
                    },
                };
                warn!(%err, "macro not restored");
                self.sink.print(&err.to_string());
                outcome.failed.push(record.name.clone());
                continue;
            };
            outcome.created += 1;

            if options.replace_bars {
                let report = place_macro_in_action_bar_slots(
                    &mut self.host,
                    &mut self.sink,
                    index,
                    set.slots_for(&record.name),
                );
                outcome.placed += report.placed.len();
                outcome.rejected_slots += report.rejected.len();
            }
        }

        debug!(set = name, created = outcome.created, placed = outcome.placed, "loaded macro set");
        self.sink.print(&format!(
            "Loaded macro set '{}' ({} of {} macros).",
            name,
            outcome.created,
            set.macros.len()
        ));
        Ok(outcome)
    }

    /// Delete set `name`, snapshotting the database first.
    ///
    /// An unknown name is reported and treated as already deleted: the database and the undo
    /// snapshot are left untouched. Returns whether a set was removed.
    pub fn delete_macro_set(&mut self, name: &str) -> bool {
        if !self.saved.sets.contains_key(name) {
            self.sink
                .print(&MacroSetError::SetNotFound(name.to_string()).to_string());
            return false;
        }
        self.backup_macro_sets();
        self.saved.sets.remove(name);
        debug!(set = name, "deleted macro set");
        self.sink.print(&format!("Deleted macro set '{}'.", name));
        true
    }

    /// Delete every set, snapshotting the database first. Returns the number removed.
    pub fn delete_all_macro_sets(&mut self) -> usize {
        self.backup_macro_sets();
        let removed = self.saved.sets.len();
        self.saved.sets.clear();
        debug!(removed, "deleted all macro sets");
        self.sink
            .print(&format!("Deleted all macro sets ({} removed).", removed));
        removed
    }

    /// Restore the sets removed since the undo snapshot, and consume the snapshot.
    ///
    /// Only names missing from the current database are re-inserted, so a set saved after the
    /// destructive operation survives the undo. Returns the number of sets in the database
    /// afterwards.
    pub fn undo_last_operation(&mut self) -> Result<usize, MacroSetError> {
        let Some(snapshot) = self.undo.take() else {
            return self.fail(MacroSetError::NothingToUndo);
        };
        let mut restored = 0;
        for (name, set) in snapshot {
            if let Entry::Vacant(entry) = self.saved.sets.entry(name) {
                entry.insert(set);
                restored += 1;
            }
        }
        let total = self.saved.sets.len();
        debug!(restored, total, "restored macro sets from snapshot");
        self.sink
            .print(&format!("Undo complete: {} macro sets restored.", restored));
        Ok(total)
    }

    /// Recompute the ascending list of set names.
    pub fn alphabetize_macro_sets(&mut self) -> &[String] {
        let mut names: Vec<String> = self.saved.sets.keys().cloned().collect();
        names.sort();
        self.sorted_set_names = names;
        &self.sorted_set_names
    }

    /// Print a summary of every set, in name order. Returns the number of lines printed.
    ///
    /// An empty database prints exactly one line. Otherwise: a header, two lines per set (summary
    /// and macro names) and a footer.
    pub fn list_macro_sets(&mut self) -> usize {
        self.alphabetize_macro_sets();
        if self.sorted_set_names.is_empty() {
            self.sink.print("No macro sets saved.");
            return 1;
        }

        let mut lines = Vec::with_capacity(self.sorted_set_names.len() * 2 + 2);
        lines.push(format!("Macro sets ({}):", self.sorted_set_names.len()));
        for name in &self.sorted_set_names {
            let Some(set) = self.saved.sets.get(name) else {
                continue;
            };
            lines.push(format!(
                "{} - {} macros ({}, slots {})",
                name,
                set.macros.len(),
                set.kind,
                set.kind.range()
            ));
            if set.macros.is_empty() {
                lines.push("    (no macros)".to_string());
            } else {
                let names: Vec<&str> = set.macros.iter().map(|m| m.name.as_str()).collect();
                lines.push(format!("    {}", names.join(", ")));
            }
        }
        lines.push("Use '/ms load <name>' to restore a set.".to_string());

        for line in &lines {
            self.sink.print(line);
        }
        lines.len()
    }

    /// Flip the `char_specific` option, returning the new value.
    pub fn toggle_char_specific(&mut self) -> bool {
        let options = &mut self.saved.options;
        options.char_specific = !options.char_specific;
        let value = options.char_specific;
        self.announce_option("Character-specific saves", value);
        value
    }

    /// Flip the `dynamic_icons` option, returning the new value.
    pub fn toggle_dynamic_icons(&mut self) -> bool {
        let options = &mut self.saved.options;
        options.dynamic_icons = !options.dynamic_icons;
        let value = options.dynamic_icons;
        self.announce_option("Dynamic icons", value);
        value
    }

    /// Flip the `replace_bars` option, returning the new value.
    pub fn toggle_action_bar_placements(&mut self) -> bool {
        let options = &mut self.saved.options;
        options.replace_bars = !options.replace_bars;
        let value = options.replace_bars;
        self.announce_option("Action bar placements", value);
        value
    }

    /// Print the current option values.
    pub fn print_options(&mut self) {
        let options = self.saved.options;
        self.announce_option("Character-specific saves", options.char_specific);
        self.announce_option("Dynamic icons", options.dynamic_icons);
        self.announce_option("Action bar placements", options.replace_bars);
    }

    fn announce_option(&mut self, label: &str, value: bool) {
        let state = if value { "on" } else { "off" };
        self.sink.print(&format!("{}: {}", label, state));
    }

    fn fail<T>(&mut self, err: MacroSetError) -> Result<T, MacroSetError> {
        warn!(%err, "macro set operation failed");
        self.sink.print(&err.to_string());
        Err(err)
    }
}
