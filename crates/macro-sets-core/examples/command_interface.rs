//! Command interface example
//!
//! Demonstrates how to use `CommandExecutor` to save, swap and restore macro sets.

use macro_sets_core::{
    ActionInfo, Command, CommandExecutor, CommandResult, InMemoryHost, MacroHost, MacroIcon,
    MacroInfo, MacroSetStore, MessageSink, SlotScope,
};

/// Prints every message straight to stdout.
struct Console;

impl MessageSink for Console {
    fn print(&mut self, message: &str) {
        println!("  > {message}");
    }
}

fn main() {
    println!("=== Macro set command interface ===\n");

    let mut host = InMemoryHost::default();
    host.insert_macro(1, MacroInfo::new("Pull", MacroIcon::FileId(132212), "/say Pulling!"));
    host.insert_macro(2, MacroInfo::new("Taunt", MacroIcon::FileId(136080), "/cast Taunt"));
    host.insert_macro(121, MacroInfo::new("Mount", MacroIcon::DYNAMIC, "/cast Swift Mount"));
    host.set_action(1, ActionInfo::macro_at(1));
    host.set_action(2, ActionInfo::macro_at(2));

    let mut executor = CommandExecutor::new(MacroSetStore::new(host, Console));

    // 1. Saving
    println!("1. Saving sets:");
    executor
        .execute(Command::Save {
            name: "tanking".to_string(),
            scope: Some(SlotScope::General),
        })
        .unwrap();
    executor.execute_line("/ms save travel c").unwrap();
    println!();

    // 2. Swapping the live macros and restoring
    println!("2. Restoring after the macros changed:");
    {
        let host = executor.store_mut().host_mut();
        host.delete_macro(1);
        host.delete_macro(2);
        host.insert_macro(1, MacroInfo::new("Fish", MacroIcon::DYNAMIC, "/cast Fishing"));
    }
    if let Ok(CommandResult::Loaded(outcome)) = executor.execute_line("load tanking") {
        println!(
            "  cleared {}, created {}, placed {} action bar slots",
            outcome.cleared, outcome.created, outcome.placed
        );
    }
    for (index, info) in executor.store().host().macros() {
        println!("  macro {index:3}: {} ({})", info.name, info.icon);
    }
    println!();

    // 3. Listing, deleting and undoing
    println!("3. Delete and undo:");
    executor.execute_line("list").unwrap();
    executor.execute_line("delete travel").unwrap();
    executor.execute_line("undo").unwrap();
    let _ = executor.execute_line("undo");
    println!();

    // 4. Options
    println!("4. Options:");
    executor.execute_line("dynamicicons").unwrap();
    executor.execute_line("options").unwrap();
    println!();

    // 5. Bad input
    println!("5. Unknown command:");
    let _ = executor.execute_line("frobnicate");
    println!();

    println!(
        "Executed {} commands.",
        executor.get_command_history().len()
    );
}
