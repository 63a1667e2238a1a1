use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::path_with_suffix;
use crate::constants::{BACKUP_SUFFIX, SWAP_GRACE_PERIOD};

/// Phases of the executable swap, in order.
///
/// The two-rename protocol (move the installed binary aside, then move the
/// staged one in) is used instead of a plain overwrite because an overwrite
/// is not atomic across platforms and leaves no recovery path when
/// interrupted. With the rename sequence, either the old binary or the new
/// one is addressable at the installed path at every point, except for the
/// brief window between [`SwapPhase::Backup`] and [`SwapPhase::Promote`] —
/// a crash inside that window is the only unrecoverable case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    /// Grace period for the caller to finish exiting and release any file
    /// handle or executable lock on the installed binary.
    Wait,
    /// Delete a stale backup if one exists, then rename the installed
    /// binary to the deterministic backup path.
    Backup,
    /// Rename the staged binary into the installed path. On failure the
    /// backup is renamed back (best-effort rollback).
    Promote,
    /// Spawn the freshly promoted binary as a detached process. A spawn
    /// failure is reported but never blocks completion.
    Relaunch,
    /// Terminal: the swap completed.
    Done,
    /// Terminal: the swap was aborted.
    Failed,
}

/// Outcome of a swap run, one entry per thing a caller might care about.
#[derive(Debug)]
pub struct SwapReport {
    /// Terminal phase reached: [`SwapPhase::Done`] or [`SwapPhase::Failed`].
    pub phase: SwapPhase,
    /// The phase in which the failure occurred, when `phase` is `Failed`.
    pub failed_in: Option<SwapPhase>,
    /// Whether the backup was renamed back into the installed path after a
    /// promotion failure.
    pub rolled_back: bool,
    /// Whether the promoted binary was relaunched successfully.
    pub relaunched: bool,
    /// The error that aborted the swap, when `phase` is `Failed`.
    pub error: Option<std::io::Error>,
}

impl SwapReport {
    fn done(relaunched: bool) -> Self {
        Self {
            phase: SwapPhase::Done,
            failed_in: None,
            rolled_back: false,
            relaunched,
            error: None,
        }
    }

    fn failed(failed_in: SwapPhase, rolled_back: bool, error: std::io::Error) -> Self {
        Self {
            phase: SwapPhase::Failed,
            failed_in: Some(failed_in),
            rolled_back,
            relaunched: false,
            error: Some(error),
        }
    }
}

/// Replaces an installed executable with a staged download.
///
/// Runs as its own short-lived process (`snapsolver-updater`) because the
/// file it operates on is the executable of the process requesting the swap,
/// which cannot overwrite itself while running on common platforms.
///
/// The backup created during the swap is kept after success; the next swap
/// cycle deletes it before renaming. Everything here is synchronous
/// `std::fs` — the agent does one thing and exits.
pub struct SwapAgent {
    old_path: PathBuf,
    new_path: PathBuf,
    backup_path: PathBuf,
    grace_period: Duration,
}

impl SwapAgent {
    /// Create an agent for replacing `old_path` with `new_path`.
    ///
    /// The backup path is derived deterministically from `old_path` by
    /// appending the backup suffix (`snapsolver` -> `snapsolver.old`).
    pub fn new(old_path: PathBuf, new_path: PathBuf) -> Self {
        let backup_path = path_with_suffix(&old_path, BACKUP_SUFFIX);
        Self {
            old_path,
            new_path,
            backup_path,
            grace_period: SWAP_GRACE_PERIOD,
        }
    }

    /// Override the grace period. Tests use a zero period; the production
    /// binary keeps the default.
    pub fn grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// The deterministic backup path for this swap.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Drive the state machine to a terminal phase.
    ///
    /// Logs one status line per transition and never panics: every failure
    /// lands in a [`SwapReport`] with `phase == Failed`.
    pub fn run(&self) -> SwapReport {
        info!(
            "Waiting {:?} for the previous instance to exit",
            self.grace_period
        );
        std::thread::sleep(self.grace_period);

        if let Err(err) = self.backup() {
            warn!("Backup failed, aborting swap: {err}");
            return SwapReport::failed(SwapPhase::Backup, false, err);
        }
        info!(
            "Backed up {} to {}",
            self.old_path.display(),
            self.backup_path.display()
        );

        if let Err(err) = self.promote() {
            let rolled_back = self.rollback();
            warn!("Promotion failed, aborting swap (rolled back: {rolled_back}): {err}");
            return SwapReport::failed(SwapPhase::Promote, rolled_back, err);
        }
        info!("Promoted {} into place", self.old_path.display());

        let relaunched = self.relaunch();
        if relaunched {
            info!("Relaunched {}", self.old_path.display());
        }

        SwapReport::done(relaunched)
    }

    /// BACKUP: clear a stale backup, then move the installed binary aside.
    fn backup(&self) -> std::io::Result<()> {
        if self.backup_path.exists() {
            std::fs::remove_file(&self.backup_path)?;
        }
        std::fs::rename(&self.old_path, &self.backup_path)
    }

    /// PROMOTE: move the staged binary into the installed path.
    fn promote(&self) -> std::io::Result<()> {
        std::fs::rename(&self.new_path, &self.old_path)
    }

    /// Best-effort restore of the installed path from the backup.
    fn rollback(&self) -> bool {
        match std::fs::rename(&self.backup_path, &self.old_path) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "Could not restore {} from backup: {err}",
                    self.old_path.display()
                );
                false
            }
        }
    }

    /// RELAUNCH: start the promoted binary detached. Failure is reported,
    /// not fatal — the swap itself already succeeded.
    fn relaunch(&self) -> bool {
        match std::process::Command::new(&self.old_path).spawn() {
            Ok(_child) => true,
            Err(err) => {
                warn!("Could not relaunch {}: {err}", self.old_path.display());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn agent(dir: &Path) -> SwapAgent {
        SwapAgent::new(dir.join("snapsolver"), dir.join("snapsolver.new"))
            .grace_period(Duration::ZERO)
    }

    #[test]
    fn swap_promotes_new_binary_and_keeps_backup() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("snapsolver"), b"old-binary").unwrap();
        std::fs::write(dir.path().join("snapsolver.new"), b"new-binary").unwrap();

        let report = agent(dir.path()).run();

        assert_eq!(report.phase, SwapPhase::Done);
        assert_eq!(
            std::fs::read(dir.path().join("snapsolver")).unwrap(),
            b"new-binary"
        );
        assert_eq!(
            std::fs::read(dir.path().join("snapsolver.old")).unwrap(),
            b"old-binary"
        );
        assert!(!dir.path().join("snapsolver.new").exists());
    }

    #[test]
    fn stale_backup_is_replaced() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("snapsolver"), b"old-binary").unwrap();
        std::fs::write(dir.path().join("snapsolver.new"), b"new-binary").unwrap();
        std::fs::write(dir.path().join("snapsolver.old"), b"ancient-binary").unwrap();

        let report = agent(dir.path()).run();

        assert_eq!(report.phase, SwapPhase::Done);
        assert_eq!(
            std::fs::read(dir.path().join("snapsolver.old")).unwrap(),
            b"old-binary"
        );
    }

    #[test]
    fn missing_staged_binary_fails_and_restores() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("snapsolver"), b"old-binary").unwrap();
        // No staged file: BACKUP succeeds, PROMOTE fails, rollback restores.

        let report = agent(dir.path()).run();

        assert_eq!(report.phase, SwapPhase::Failed);
        assert_eq!(report.failed_in, Some(SwapPhase::Promote));
        assert!(report.rolled_back);
        assert_eq!(
            std::fs::read(dir.path().join("snapsolver")).unwrap(),
            b"old-binary"
        );
        assert!(!dir.path().join("snapsolver.old").exists());
    }

    #[test]
    fn missing_installed_binary_fails_in_backup() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("snapsolver.new"), b"new-binary").unwrap();

        let report = agent(dir.path()).run();

        assert_eq!(report.phase, SwapPhase::Failed);
        assert_eq!(report.failed_in, Some(SwapPhase::Backup));
        assert!(!report.rolled_back);
        // The staged file is left untouched for a later attempt.
        assert!(dir.path().join("snapsolver.new").exists());
    }

    #[test]
    fn backup_path_is_deterministic() {
        let agent = SwapAgent::new(
            PathBuf::from("/opt/app/snapsolver.exe"),
            PathBuf::from("/opt/app/snapsolver.exe.new"),
        );
        assert_eq!(
            agent.backup_path(),
            Path::new("/opt/app/snapsolver.exe.old")
        );
    }
}
