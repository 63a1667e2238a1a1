use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{debug, info, warn};

use crate::core::UpdateError;
use crate::instance::LockStore;

/// Supersedes any previously recorded SnapSolver instance at startup.
///
/// The sequence is read-kill-overwrite: read the PID on disk, send the
/// recorded process a forced termination if it is not this process, then
/// record this process unconditionally. Termination failures (process
/// already gone, permission denied) are swallowed — the overwrite alone
/// makes this process the recorded primary.
///
/// Must complete fully before any update check begins, so that no other
/// process is superseding the same lock file concurrently with an update
/// attempt.
pub struct InstanceSupervisor {
    store: LockStore,
}

impl InstanceSupervisor {
    /// Create a supervisor over the given lock store.
    pub fn new(store: LockStore) -> Self {
        Self { store }
    }

    /// Kill the recorded predecessor (best effort) and record this process.
    ///
    /// # Errors
    ///
    /// Only the final lock write can fail; termination problems never
    /// propagate. Callers may treat even that failure as non-fatal — the
    /// application still runs, it is merely not recorded as primary.
    pub async fn supersede_previous_instance(&self) -> Result<(), UpdateError> {
        let my_pid = std::process::id();

        match self.store.read().await {
            Some(pid) if pid != my_pid => terminate(pid),
            Some(_) => debug!("Lock record already names this process"),
            None => debug!("No prior instance recorded"),
        }

        self.store.write(my_pid).await?;
        info!("Recorded as primary instance (pid {my_pid})");
        Ok(())
    }
}

/// Send a forced termination to `pid` if such a process exists.
///
/// Advisory only: the kill is not confirmed, and any failure is logged and
/// swallowed.
fn terminate(pid: u32) {
    let target = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[target]),
        true,
        ProcessRefreshKind::nothing(),
    );

    match system.process(target) {
        Some(process) => {
            warn!("Terminating previous instance (pid {pid})");
            if !process.kill() {
                warn!("Could not terminate pid {pid}; continuing anyway");
            }
        }
        None => debug!("Previous instance (pid {pid}) is no longer running"),
    }
}
