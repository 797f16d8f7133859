//! Persistence and the line-driven command loop.

use anyhow::{Context, Result};
use macro_sets_core::{
    CommandExecutor, HostLayout, InMemoryHost, MacroSetStore, SavedVariables, StoreConfig,
};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

pub type Executor = CommandExecutor<InMemoryHost, Vec<String>>;

/// Read the saved-variables table, or start empty when `path` does not exist.
pub fn load_saved(path: &Path) -> Result<SavedVariables> {
    if !path.exists() {
        info!(path = %path.display(), "no saved state, starting empty");
        return Ok(SavedVariables::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse state file {}", path.display()))
}

/// Write the saved-variables table as pretty JSON.
pub fn store_saved(path: &Path, saved: &SavedVariables) -> Result<()> {
    let text = serde_json::to_string_pretty(saved)?;
    fs::write(path, text)
        .with_context(|| format!("failed to write state file {}", path.display()))
}

/// Build the simulated host, optionally seeded from a layout file.
pub fn load_host(seed: Option<&Path>, config: StoreConfig) -> Result<InMemoryHost> {
    let Some(path) = seed else {
        return Ok(InMemoryHost::new(config));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read host layout {}", path.display()))?;
    let layout: HostLayout = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse host layout {}", path.display()))?;
    debug!(
        macros = layout.macros.len(),
        actions = layout.actions.len(),
        "seeded host"
    );
    Ok(InMemoryHost::from_layout(layout, config))
}

/// Write the host layout as pretty JSON.
pub fn store_host(path: &Path, host: &InMemoryHost) -> Result<()> {
    let text = serde_json::to_string_pretty(&host.layout())?;
    fs::write(path, text)
        .with_context(|| format!("failed to write host layout {}", path.display()))
}

pub fn executor(host: InMemoryHost, saved: SavedVariables) -> Executor {
    CommandExecutor::new(MacroSetStore::with_saved(host, Vec::new(), saved))
}

/// Execute each non-blank line of `input`, writing the messages it produces to `output`.
///
/// Command failures have already been printed by the executor and do not stop the loop. Returns
/// the number of commands that failed.
pub fn run_lines<R: BufRead, W: Write>(
    executor: &mut Executor,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut failures = 0;
    for line in input.lines() {
        let line = line.context("failed to read command line")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = executor.execute_line(line) {
            debug!(%err, line, "command failed");
            failures += 1;
        }
        for message in executor.store_mut().sink_mut().drain(..) {
            writeln!(output, "{message}")?;
        }
    }
    output.flush()?;
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_sets_core::{ActionInfo, MacroIcon, MacroInfo};
    use pretty_assertions::assert_eq;

    fn seeded_layout() -> HostLayout {
        let mut host = InMemoryHost::default();
        host.insert_macro(1, MacroInfo::new("Pull", MacroIcon::DYNAMIC, "/say Pulling!"));
        host.set_action(1, ActionInfo::macro_at(1));
        host.layout()
    }

    #[test]
    fn test_missing_state_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let saved = load_saved(&dir.path().join("MacroSets.json")).unwrap();
        assert!(saved.sets.is_empty());
        assert!(saved.options.replace_bars);
    }

    #[test]
    fn test_corrupt_state_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MacroSets.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_saved(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse state file"));
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("MacroSets.json");
        let seed = dir.path().join("host.json");
        fs::write(&seed, serde_json::to_string(&seeded_layout()).unwrap()).unwrap();

        let host = load_host(Some(&seed), StoreConfig::default()).unwrap();
        let mut executor = executor(host, load_saved(&state).unwrap());
        let mut out = Vec::new();
        let script = "# comment\nsave pulls g\n\nbogus\nlist\n";
        let failures = run_lines(&mut executor, script.as_bytes(), &mut out).unwrap();
        assert_eq!(failures, 1);

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines[0], "Saved macro set 'pulls' (1 general macros).");
        assert_eq!(lines[1], "Unknown command 'bogus'.");
        assert!(printed.ends_with("Use '/ms load <name>' to restore a set.\n"));

        let store = executor.into_store();
        store_saved(&state, store.saved()).unwrap();
        let reloaded = load_saved(&state).unwrap();
        assert_eq!(reloaded.sets["pulls"].slots_for("Pull"), &[1]);

        store_host(&seed, store.host()).unwrap();
        let host = load_host(Some(&seed), StoreConfig::default()).unwrap();
        assert_eq!(host.macro_at(1).unwrap().name, "Pull");
    }
}
