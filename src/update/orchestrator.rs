use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::UpdateConfig;
use crate::core::UpdateError;
use crate::notify::{Notifier, UpdateNotice};
use crate::update::{PackageFetcher, VersionOracle};

/// Result of a single update check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The installed version matches the published token; nothing was done.
    UpToDate,
    /// A new version is staged and the Swap Agent has been spawned.
    ///
    /// The calling binary must now exit with code 0: the agent waits for the
    /// caller to release its executable lock before performing the swap.
    SwapScheduled,
}

/// Seam between the [`UpdateListener`](crate::update::UpdateListener) and
/// whatever performs the actual check, so the listener's loop behavior can be
/// tested with a scripted stand-in.
#[async_trait]
pub trait UpdateCheck: Send + Sync {
    /// Run one background check cycle.
    async fn run_check(&self) -> Result<CheckOutcome, UpdateError>;
}

/// Decides whether an update is needed and drives it to the hand-off point.
///
/// One check is one strictly sequential pass: ask the oracle, compare
/// byte-for-byte against the embedded current version, stream the artifact to
/// the staging path beside the installed binary, then spawn the co-located
/// Swap Agent and tell the caller to exit. Re-invoking when no new version
/// exists is a no-op. Concurrent invocations are not guarded against here;
/// callers serialize checks (the listener never overlaps them).
pub struct UpdateOrchestrator {
    config: UpdateConfig,
    oracle: VersionOracle,
    notifier: Arc<dyn Notifier>,
}

impl UpdateOrchestrator {
    /// Create an orchestrator over the given configuration and notice sink.
    pub fn new(config: UpdateConfig, notifier: Arc<dyn Notifier>) -> Self {
        let oracle = VersionOracle::new(config.version_url.clone());
        Self {
            config,
            oracle,
            notifier,
        }
    }

    /// Check for a new release and, if one exists, stage it and hand off to
    /// the Swap Agent.
    ///
    /// With `interactive` set, every step surfaces a user-visible notice
    /// through the [`Notifier`]; background checks only log.
    ///
    /// # Errors
    ///
    /// Transient network errors mean the cycle was skipped; filesystem
    /// errors mean this attempt was aborted. Neither is fatal to the host
    /// process, which continues on the installed version.
    pub async fn check_and_update(
        &self,
        interactive: bool,
    ) -> Result<CheckOutcome, UpdateError> {
        let latest = match self.oracle.fetch_latest_version().await {
            Ok(latest) => latest,
            Err(err) => {
                warn!("Update check skipped: {err}");
                if interactive {
                    self.notifier
                        .notify(&UpdateNotice::CheckFailed(err.to_string()));
                }
                return Err(err);
            }
        };

        if latest == self.config.current_version {
            debug!("Already on the latest version ({latest})");
            if interactive {
                self.notifier.notify(&UpdateNotice::UpToDate(latest));
            }
            return Ok(CheckOutcome::UpToDate);
        }

        info!(
            "Update available: {} -> {latest}",
            self.config.current_version
        );
        if interactive {
            self.notifier
                .notify(&UpdateNotice::Downloading(latest.clone()));
        }

        match self.stage_and_hand_off(interactive).await {
            Ok(()) => {
                if interactive {
                    self.notifier.notify(&UpdateNotice::RestartPending(latest));
                }
                Ok(CheckOutcome::SwapScheduled)
            }
            Err(err) => {
                warn!("Update attempt aborted: {err}");
                Err(err)
            }
        }
    }

    async fn stage_and_hand_off(&self, interactive: bool) -> Result<(), UpdateError> {
        let staging = self.config.staging_path();
        let fetcher =
            PackageFetcher::new(self.config.package_url.clone())?.show_progress(interactive);

        if let Err(err) = fetcher.fetch_package(&staging).await {
            if interactive {
                self.notifier
                    .notify(&UpdateNotice::UpdateFailed(err.to_string()));
            }
            return Err(err);
        }

        let agent = self.config.agent_path();
        if !agent.exists() {
            if interactive {
                self.notifier
                    .notify(&UpdateNotice::AgentMissing(agent.display().to_string()));
            }
            return Err(UpdateError::AgentMissing { path: agent });
        }

        if let Err(err) = self.spawn_agent(&agent, &staging) {
            if interactive {
                self.notifier
                    .notify(&UpdateNotice::UpdateFailed(err.to_string()));
            }
            return Err(err);
        }
        Ok(())
    }

    /// Spawn the Swap Agent detached with the documented two-argument
    /// contract: the installed executable path and the staged download path.
    fn spawn_agent(&self, agent: &Path, staging: &Path) -> Result<(), UpdateError> {
        info!(
            "Handing off to {} ({} -> {})",
            agent.display(),
            staging.display(),
            self.config.install_path.display()
        );

        std::process::Command::new(agent)
            .arg(&self.config.install_path)
            .arg(staging)
            .spawn()
            .map(drop)
            .map_err(|source| UpdateError::AgentSpawn {
                path: agent.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl UpdateCheck for UpdateOrchestrator {
    async fn run_check(&self) -> Result<CheckOutcome, UpdateError> {
        self.check_and_update(false).await
    }
}
