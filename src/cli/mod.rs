//! Command-line interface for the SnapSolver host binary.
//!
//! Two modes of operation:
//!
//! - **Default (no subcommand)**: run the application. Instance supervision
//!   runs first and fully (kill the recorded predecessor, record this
//!   process), then one silent startup update check, then the background
//!   update listener for the lifetime of the process. The capture/UI loop of
//!   the full application attaches at the point where the shell parks on
//!   Ctrl-C.
//! - **`check`**: perform one interactive update check, surfacing
//!   "up to date" / "downloading" / failure notices on the terminal, and
//!   exit. If an update is staged the process exits so the Swap Agent can
//!   replace it.
//!
//! # Examples
//!
//! ```bash
//! snapsolver              # run the application
//! snapsolver check        # one interactive update check
//! snapsolver -v check     # same, with debug logging
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::UpdateConfig;
use crate::instance::{InstanceSupervisor, LockStore};
use crate::notify::{ConsoleNotifier, Notifier};
use crate::update::{CheckOutcome, UpdateListener, UpdateOrchestrator};

/// Top-level CLI definition.
#[derive(Parser)]
#[command(name = "snapsolver", version, about = "Screenshot-to-answer desktop assistant")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose (debug-level) log output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for a new release now and apply it if one is available.
    Check,
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let config = UpdateConfig::load().await?;

        match self.command {
            Some(Commands::Check) => run_interactive_check(config).await,
            None => run_application(config).await,
        }
    }

    /// Install the global tracing subscriber. `--verbose` forces debug
    /// level, an existing `RUST_LOG` is respected, and the default is info.
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new("info")
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    }
}

/// One interactive check: notices go to the terminal, and a staged update
/// means exiting immediately so the Swap Agent can take over.
async fn run_interactive_check(config: UpdateConfig) -> Result<()> {
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let orchestrator = UpdateOrchestrator::new(config, notifier);

    match orchestrator.check_and_update(true).await {
        Ok(CheckOutcome::SwapScheduled) => std::process::exit(0),
        Ok(CheckOutcome::UpToDate) => Ok(()),
        // The notice is already on the terminal; just report the failure in
        // the exit status.
        Err(_) => std::process::exit(1),
    }
}

/// The application run sequence: supervision, startup check, listener.
async fn run_application(config: UpdateConfig) -> Result<()> {
    // Supervision completes fully before any update check begins, so no
    // other process is superseding the lock concurrently with an update.
    let supervisor = InstanceSupervisor::new(LockStore::new(config.lock_path()));
    if let Err(err) = supervisor.supersede_previous_instance().await {
        warn!("Instance supervision incomplete: {err}");
    }

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let orchestrator = Arc::new(UpdateOrchestrator::new(config.clone(), notifier));

    // One silent startup check before the UI would come up.
    if let Ok(CheckOutcome::SwapScheduled) = orchestrator.check_and_update(false).await {
        std::process::exit(0);
    }

    let listener = UpdateListener::new(orchestrator, config.check_interval);
    tokio::spawn(async move {
        listener.run_forever().await;
        // A new version is staged; exit so the Swap Agent can replace us.
        std::process::exit(0);
    });

    // The capture/UI loop of the full application lives here; the shell
    // parks until interrupted.
    tokio::signal::ctrl_c().await?;
    info!("Interrupted; exiting");
    Ok(())
}
