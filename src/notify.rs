//! User-visible notices for interactive update checks.
//!
//! The update subsystem never talks to the UI layer directly; it reports
//! through the [`Notifier`] seam. Background checks stay silent (failures go
//! to the log only), interactive checks surface every notice. The console
//! implementation here serves the CLI surface; the windowed front end plugs
//! in its own implementation.

use colored::Colorize;

/// A notice surfaced to the user during an interactive check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateNotice {
    /// The version endpoint could not be reached or answered abnormally.
    CheckFailed(String),
    /// The installed version matches the latest release.
    UpToDate(String),
    /// A newer version was found and its download has started.
    Downloading(String),
    /// The download or the Swap Agent hand-off failed; this attempt was
    /// aborted and the application keeps running the installed version.
    UpdateFailed(String),
    /// The co-located updater helper is missing; this attempt was aborted.
    AgentMissing(String),
    /// The new binary is staged and the Swap Agent has taken over; the
    /// application is about to exit and relaunch.
    RestartPending(String),
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    /// Surface a single notice.
    fn notify(&self, notice: &UpdateNotice);
}

/// Prints notices to the terminal, colored like the rest of the CLI output.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &UpdateNotice) {
        match notice {
            UpdateNotice::CheckFailed(reason) => {
                eprintln!("{}", format!("Update check failed: {reason}").red());
            }
            UpdateNotice::UpToDate(version) => {
                println!(
                    "{}",
                    format!("You are on the latest version ({version})").green()
                );
            }
            UpdateNotice::Downloading(version) => {
                println!(
                    "{}",
                    format!("Update available ({version}). Downloading...").cyan()
                );
            }
            UpdateNotice::UpdateFailed(reason) => {
                eprintln!("{}", format!("Update failed: {reason}").red());
            }
            UpdateNotice::AgentMissing(path) => {
                eprintln!(
                    "{}",
                    format!("Cannot update: updater helper missing at {path}").red()
                );
            }
            UpdateNotice::RestartPending(version) => {
                println!(
                    "{}",
                    format!("Update staged. Relaunching as version {version}...").green()
                );
            }
        }
    }
}
