use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::update::orchestrator::{CheckOutcome, UpdateCheck};

/// Repeats background update checks on a fixed interval.
///
/// Iterations run strictly sequentially — a new check only starts after the
/// previous one has fully finished, so downloads never overlap. A failing
/// iteration is logged and swallowed; it never ends the loop.
pub struct UpdateListener {
    check: Arc<dyn UpdateCheck>,
    interval: Duration,
}

impl UpdateListener {
    /// Create a listener that runs `check` every `interval`.
    pub fn new(check: Arc<dyn UpdateCheck>, interval: Duration) -> Self {
        Self { check, interval }
    }

    /// Run check cycles until one schedules a swap.
    ///
    /// Returns only when an iteration reports
    /// [`CheckOutcome::SwapScheduled`]; the caller must then exit with code 0
    /// so the Swap Agent can replace the binary. In every other case the
    /// loop sleeps for the configured interval and goes again.
    pub async fn run_forever(&self) -> CheckOutcome {
        info!(
            "Background update checks every {}s",
            self.interval.as_secs()
        );

        loop {
            match self.check.run_check().await {
                Ok(CheckOutcome::SwapScheduled) => {
                    info!("Swap scheduled; stopping background checks");
                    return CheckOutcome::SwapScheduled;
                }
                Ok(CheckOutcome::UpToDate) => debug!("No update available"),
                Err(err) if err.is_transient() => debug!("Update check skipped: {err}"),
                Err(err) => warn!("Background update check failed: {err}"),
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
