//! SnapSolver Swap Agent entry point.
//!
//! A separate, short-lived executable that replaces the installed SnapSolver
//! binary with a staged download. It must be a separate process: the file it
//! operates on is the executable of the process requesting the swap, which
//! cannot overwrite itself while running on common platforms.
//!
//! Invocation contract (see the orchestrator's hand-off): exactly two
//! positional arguments, the installed executable path and the staged
//! download path. One status line is logged per state transition; the
//! process terminates when done.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snapsolver::constants::SWAP_GRACE_PERIOD;
use snapsolver::update::{SwapAgent, SwapPhase};

#[derive(Parser)]
#[command(
    name = "snapsolver-updater",
    version,
    about = "Replaces the installed SnapSolver executable with a staged download"
)]
struct Args {
    /// Path of the currently installed executable to replace.
    old_exe_path: PathBuf,

    /// Path of the newly downloaded executable to promote.
    new_exe_path: PathBuf,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    let args = Args::parse();

    let grace = std::env::var("SNAPSOLVER_SWAP_GRACE_MS")
        .ok()
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(SWAP_GRACE_PERIOD);

    let report = SwapAgent::new(args.old_exe_path, args.new_exe_path)
        .grace_period(grace)
        .run();

    std::process::exit(match report.phase {
        SwapPhase::Done => 0,
        _ => 1,
    });
}
