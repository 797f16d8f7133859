#![warn(missing_docs)]
//! Macro Sets Core - Headless Macro-Set Manager
//!
//! # Overview
//!
//! `macro-sets-core` groups a player's in-game macros into named *sets*, persists them, and
//! restores a set by recreating its macros in the client's macro slots and putting them back on
//! the action bars they occupied. It does not talk to a game client itself; the client is
//! reached through the [`MacroHost`] and [`MessageSink`] traits.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (Command, Executor)       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  MacroSetStore (save/load/delete/undo/list) │  ← Lifecycle
//! ├─────────────────────────────────────────────┤
//! │  Placement · Range deletion · Validation    │  ← Primitives
//! ├─────────────────────────────────────────────┤
//! │  Slot ranges · Deep copy · Data model       │  ← Foundations
//! ├─────────────────────────────────────────────┤
//! │  MacroHost / MessageSink                    │  ← Host boundary
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use macro_sets_core::{
//!     CommandExecutor, InMemoryHost, MacroIcon, MacroInfo, MacroSetStore,
//! };
//!
//! let mut host = InMemoryHost::default();
//! host.insert_macro(1, MacroInfo::new("Pull", MacroIcon::DYNAMIC, "/say Pulling!"));
//! host.insert_macro(121, MacroInfo::new("Mount", MacroIcon::DYNAMIC, "/cast Swift Mount"));
//!
//! let mut executor = CommandExecutor::new(MacroSetStore::new(host, Vec::<String>::new()));
//! executor.execute_line("save everyday").unwrap();
//! executor.execute_line("list").unwrap();
//!
//! assert_eq!(executor.store().sets()["everyday"].macros.len(), 2);
//! ```
//!
//! # Module Description
//!
//! - [`deep_copy`] - nested tables with metatables, and the [`DeepCopy`] trait
//! - [`naming`] - set-name validation and duplicate detection
//! - [`slots`] - general/character macro index partitions
//! - [`placement`] - action-bar placement and reverse lookup
//! - [`range_delete`] - deleting host macros by index range
//! - [`store`] - the macro-set lifecycle
//! - [`commands`] - command parsing and dispatch
//! - [`memory`] - simulated host

pub mod commands;
pub mod config;
pub mod deep_copy;
mod error;
pub mod host;
pub mod memory;
pub mod model;
pub mod naming;
pub mod placement;
pub mod range_delete;
pub mod slots;
pub mod store;

pub use commands::{Command, CommandError, CommandExecutor, CommandResult, help_lines};
pub use config::{DEFAULT_ACTION_BAR_SLOT_LIMIT, StoreConfig};
pub use deep_copy::{DeepCopy, Key, Scalar, Table, TableRef, Value, deep_copy};
pub use error::MacroSetError;
pub use host::{ActionInfo, ActionKind, MacroHost, MacroInfo, MessageSink};
pub use memory::{HostCalls, HostLayout, InMemoryHost};
pub use model::{MacroIcon, MacroRecord, MacroSet, MacroSetsDb, Options, SavedVariables};
pub use naming::{MAX_SET_NAME_LEN, duplicate_names, has_duplicate_names, is_valid_set_name};
pub use placement::{PlacementReport, action_bar_slots_for_macro, place_macro_in_action_bar_slots};
pub use range_delete::delete_macros_in_range;
pub use slots::{SlotRange, SlotScope, is_macro_set_empty, resolve_slot_range};
pub use store::{LoadOutcome, MacroSetStore, SaveOutcome};
