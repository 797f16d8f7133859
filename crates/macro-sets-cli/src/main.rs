//! MacroSets command line front end.
//!
//! Reads `/ms`-style command lines from stdin and runs them against a simulated macro host:
//! - saved sets and options persist in a JSON state file
//! - the host's macros and action bars can be seeded from (and written back to) a layout file
//! - user-visible messages go to stdout, logs to stderr

mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use macro_sets_core::{DEFAULT_ACTION_BAR_SLOT_LIMIT, StoreConfig};
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "macro-sets")]
#[command(about = "Save, restore and place game macro sets")]
struct Args {
    /// Saved-variables JSON file (created if missing)
    #[arg(short, long, value_name = "PATH", default_value = "MacroSets.json")]
    state: PathBuf,

    /// Number of action bar slots the host exposes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_ACTION_BAR_SLOT_LIMIT)]
    slot_limit: u32,

    /// Host layout JSON (macros and action bars) to start from
    #[arg(long, value_name = "PATH")]
    seed_host: Option<PathBuf>,

    /// Write the final host layout back to the seed file
    #[arg(long, requires = "seed_host")]
    write_host: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing();

    let config = StoreConfig::default().with_action_bar_slot_limit(args.slot_limit);
    let saved = session::load_saved(&args.state)?;
    let host = session::load_host(args.seed_host.as_deref(), config)?;
    info!(sets = saved.sets.len(), state = %args.state.display(), "loaded state");

    let mut executor = session::executor(host, saved);
    let failures = session::run_lines(&mut executor, io::stdin().lock(), io::stdout().lock())?;

    let store = executor.into_store();
    session::store_saved(&args.state, store.saved())?;
    if args.write_host
        && let Some(path) = &args.seed_host
    {
        session::store_host(path, store.host())?;
    }
    info!(failures, "session finished");
    Ok(())
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("MACRO_SETS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
