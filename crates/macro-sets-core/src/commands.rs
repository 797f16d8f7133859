//! Command Interface Layer
//!
//! Slash-command lines are parsed into a [`Command`] and dispatched by [`CommandExecutor`] to the
//! matching [`MacroSetStore`] operation. Dispatch is an exhaustive `match`, so adding a command
//! variant without a handler does not compile.
//!
//! # Example
//!
//! ```rust
//! use macro_sets_core::{Command, CommandExecutor, CommandResult, InMemoryHost, MacroSetStore};
//!
//! let store = MacroSetStore::new(InMemoryHost::default(), Vec::<String>::new());
//! let mut executor = CommandExecutor::new(store);
//!
//! let result = executor.execute(Command::parse("list").unwrap()).unwrap();
//! assert_eq!(result, CommandResult::Listed { lines: 1 });
//! assert_eq!(executor.store().sink()[0], "No macro sets saved.");
//! ```

use crate::error::MacroSetError;
use crate::host::{MacroHost, MessageSink};
use crate::model::Options;
use crate::slots::SlotScope;
use crate::store::{LoadOutcome, MacroSetStore, SaveOutcome};
use thiserror::Error;
use tracing::debug;

/// Slash-command prefixes accepted (and ignored) in front of a command line.
pub const SLASH_PREFIXES: &[&str] = &["/ms", "/macrosets"];

/// Usage line per command word, in help order.
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("save", "/ms save <name> [g|c|both] - save current macros as a set"),
    ("load", "/ms load <name> - replace macros with a saved set"),
    ("delete", "/ms delete <name> - delete a saved set"),
    ("deleteall", "/ms deleteall - delete every saved set"),
    ("undo", "/ms undo - undo the last delete"),
    ("alphabetize", "/ms alphabetize - sort set names"),
    ("list", "/ms list - list saved sets"),
    ("options", "/ms options - show option values"),
    ("charspecific", "/ms charspecific - toggle character-only default saves"),
    ("dynamicicons", "/ms dynamicicons - toggle question-mark icons on load"),
    ("replacebars", "/ms replacebars - toggle action bar placement"),
    ("help", "/ms help [command] - show help"),
];

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save host macros as a set.
    Save {
        /// Set name (validated by the store).
        name: String,
        /// Explicit scope, or `None` for the option-dependent default.
        scope: Option<SlotScope>,
    },
    /// Restore a set.
    Load {
        /// Set name.
        name: String,
    },
    /// Delete a set.
    Delete {
        /// Set name.
        name: String,
    },
    /// Delete every set.
    DeleteAll,
    /// Undo the last destructive operation.
    Undo,
    /// Sort set names.
    Alphabetize,
    /// List sets.
    List,
    /// Show usage.
    Help {
        /// Command word to describe, or all commands.
        topic: Option<String>,
    },
    /// Show option values.
    Options,
    /// Toggle the `char_specific` option.
    ToggleCharSpecific,
    /// Toggle the `dynamic_icons` option.
    ToggleDynamicIcons,
    /// Toggle the `replace_bars` option.
    ToggleActionBarPlacements,
}

impl Command {
    /// Parse a command line such as `save raid g` or `/ms load raid`.
    ///
    /// The command word is case-insensitive; arguments are taken verbatim. An empty line means
    /// [`Command::Help`].
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace().peekable();
        if words
            .peek()
            .is_some_and(|first| SLASH_PREFIXES.iter().any(|p| first.eq_ignore_ascii_case(p)))
        {
            words.next();
        }
        let Some(word) = words.next() else {
            return Ok(Command::Help { topic: None });
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "save" => Command::Save {
                name: required(&mut words, "save", "name")?,
                scope: words.next().map(SlotScope::from_tag),
            },
            "load" => Command::Load {
                name: required(&mut words, "load", "name")?,
            },
            "delete" => Command::Delete {
                name: required(&mut words, "delete", "name")?,
            },
            "deleteall" => Command::DeleteAll,
            "undo" => Command::Undo,
            "alphabetize" => Command::Alphabetize,
            "list" => Command::List,
            "help" => Command::Help {
                topic: words.next().map(str::to_ascii_lowercase),
            },
            "options" => Command::Options,
            "charspecific" => Command::ToggleCharSpecific,
            "dynamicicons" => Command::ToggleDynamicIcons,
            "replacebars" => Command::ToggleActionBarPlacements,
            _ => return Err(CommandError::UnknownCommand(word.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    words
        .next()
        .map(str::to_string)
        .ok_or(CommandError::MissingArgument { command, argument })
}

/// Usage lines for `topic`, or for every command.
pub fn help_lines(topic: Option<&str>) -> Vec<&'static str> {
    match topic {
        Some(topic) => COMMAND_HELP
            .iter()
            .filter(|(word, _)| *word == topic)
            .map(|(_, usage)| *usage)
            .collect(),
        None => COMMAND_HELP.iter().map(|(_, usage)| *usage).collect(),
    }
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// A set was saved.
    Saved(SaveOutcome),
    /// A set was loaded.
    Loaded(LoadOutcome),
    /// Delete ran; `removed` is false when the set did not exist.
    Deleted {
        /// Whether a set was removed.
        removed: bool,
    },
    /// Every set was deleted.
    DeletedAll {
        /// Number of sets removed.
        removed: usize,
    },
    /// The undo snapshot was restored.
    Restored {
        /// Number of sets after restoring.
        sets: usize,
    },
    /// Sorted set names.
    Names(Vec<String>),
    /// Sets were listed.
    Listed {
        /// Lines printed.
        lines: usize,
    },
    /// Usage was printed.
    Help,
    /// Current option values.
    Options(Options),
    /// An option was toggled to the given value.
    Toggled(bool),
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    /// The command word is not recognized.
    UnknownCommand(String),

    #[error("'{command}' requires a {argument}")]
    /// A required argument was missing.
    MissingArgument {
        /// Command word.
        command: &'static str,
        /// Missing argument.
        argument: &'static str,
    },

    #[error(transparent)]
    /// The store rejected the operation.
    Operation(#[from] MacroSetError),
}

/// Dispatches [`Command`]s to a [`MacroSetStore`] and keeps a command history.
pub struct CommandExecutor<H, S> {
    store: MacroSetStore<H, S>,
    command_history: Vec<Command>,
}

impl<H: MacroHost, S: MessageSink> CommandExecutor<H, S> {
    /// Create an executor over `store`.
    pub fn new(store: MacroSetStore<H, S>) -> Self {
        Self {
            store,
            command_history: Vec::new(),
        }
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        debug!(?command, "executing command");
        self.command_history.push(command.clone());

        let store = &mut self.store;
        let result = match command {
            Command::Save { name, scope } => {
                CommandResult::Saved(store.save_macro_set(&name, scope)?)
            }
            Command::Load { name } => CommandResult::Loaded(store.load_macro_set(&name)?),
            Command::Delete { name } => CommandResult::Deleted {
                removed: store.delete_macro_set(&name),
            },
            Command::DeleteAll => CommandResult::DeletedAll {
                removed: store.delete_all_macro_sets(),
            },
            Command::Undo => CommandResult::Restored {
                sets: store.undo_last_operation()?,
            },
            Command::Alphabetize => CommandResult::Names(store.alphabetize_macro_sets().to_vec()),
            Command::List => CommandResult::Listed {
                lines: store.list_macro_sets(),
            },
            Command::Help { topic } => {
                print_help(store.sink_mut(), topic.as_deref());
                CommandResult::Help
            }
            Command::Options => {
                store.print_options();
                CommandResult::Options(store.options())
            }
            Command::ToggleCharSpecific => CommandResult::Toggled(store.toggle_char_specific()),
            Command::ToggleDynamicIcons => CommandResult::Toggled(store.toggle_dynamic_icons()),
            Command::ToggleActionBarPlacements => {
                CommandResult::Toggled(store.toggle_action_bar_placements())
            }
        };
        Ok(result)
    }

    /// Parse and execute one command line.
    ///
    /// Parse errors are printed together with the usage text before being returned.
    pub fn execute_line(&mut self, line: &str) -> Result<CommandResult, CommandError> {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                let sink = self.store.sink_mut();
                sink.print(&format!("{}.", capitalize(&err.to_string())));
                print_help(sink, None);
                Err(err)
            }
        }
    }

    /// Execute commands in order, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Get command history
    pub fn get_command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// The wrapped store.
    pub fn store(&self) -> &MacroSetStore<H, S> {
        &self.store
    }

    /// Mutable access to the wrapped store.
    pub fn store_mut(&mut self) -> &mut MacroSetStore<H, S> {
        &mut self.store
    }

    /// Consume the executor, returning the store.
    pub fn into_store(self) -> MacroSetStore<H, S> {
        self.store
    }
}

fn print_help<S: MessageSink + ?Sized>(sink: &mut S, topic: Option<&str>) {
    let mut lines = help_lines(topic);
    if lines.is_empty() {
        if let Some(topic) = topic {
            sink.print(&format!("No help for '{}'.", topic));
        }
        lines = help_lines(None);
    } else if topic.is_none() {
        sink.print("MacroSets commands:");
    }
    for line in lines {
        sink.print(line);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_words() {
        let cases = [
            (
                "save test",
                Command::Save {
                    name: "test".into(),
                    scope: None,
                },
            ),
            (
                "save test c",
                Command::Save {
                    name: "test".into(),
                    scope: Some(SlotScope::Character),
                },
            ),
            ("load test", Command::Load { name: "test".into() }),
            ("delete test", Command::Delete { name: "test".into() }),
            ("deleteall", Command::DeleteAll),
            ("undo", Command::Undo),
            ("alphabetize", Command::Alphabetize),
            ("list", Command::List),
            (
                "help save",
                Command::Help {
                    topic: Some("save".into()),
                },
            ),
            ("options", Command::Options),
            ("charspecific", Command::ToggleCharSpecific),
            ("dynamicicons", Command::ToggleDynamicIcons),
            ("replacebars", Command::ToggleActionBarPlacements),
        ];
        for (line, expected) in cases {
            assert_eq!(Command::parse(line), Ok(expected), "parsing {line:?}");
        }
    }

    #[test]
    fn test_parse_prefix_case_and_whitespace() {
        assert_eq!(
            Command::parse("  /MS   LOAD   Raid_1 "),
            Ok(Command::Load {
                name: "Raid_1".into()
            })
        );
        assert_eq!(Command::parse(""), Ok(Command::Help { topic: None }));
        assert_eq!(Command::parse("/macrosets"), Ok(Command::Help { topic: None }));
    }

    #[test]
    fn test_parse_unknown_scope_degrades_to_both() {
        assert_eq!(
            Command::parse("save x everything"),
            Ok(Command::Save {
                name: "x".into(),
                scope: Some(SlotScope::Both),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("invalid"),
            Err(CommandError::UnknownCommand("invalid".into()))
        );
        assert_eq!(
            Command::parse("load"),
            Err(CommandError::MissingArgument {
                command: "load",
                argument: "name"
            })
        );
    }

    #[test]
    fn test_help_lines() {
        assert_eq!(help_lines(None).len(), COMMAND_HELP.len());
        assert_eq!(help_lines(Some("undo")), vec!["/ms undo - undo the last delete"]);
        assert!(help_lines(Some("bogus")).is_empty());
    }
}
