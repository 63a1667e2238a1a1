//! SnapSolver CLI entry point
//!
//! This is the main executable for the SnapSolver desktop assistant. It
//! handles command-line argument parsing and runs the application shell:
//! instance supervision, the startup update check, and the background update
//! listener.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use snapsolver::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            std::process::exit(1);
        }
    }
}
