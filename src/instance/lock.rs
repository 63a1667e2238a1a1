use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::core::UpdateError;

/// Persists the single PID record that marks the primary SnapSolver instance.
///
/// The record is a plain decimal process id in a fixed file inside the
/// application data directory. At most one record exists; it is overwritten
/// in place on every process start and never deleted.
///
/// There is no concurrent-writer protection: only one process performs the
/// read-then-overwrite sequence at a time by design, since the supervisor
/// runs synchronously before anything else in the process.
pub struct LockStore {
    path: PathBuf,
}

impl LockStore {
    /// Create a store backed by the given lock file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the underlying lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded PID, failing softly.
    ///
    /// A missing file, unreadable file, or content that is not a positive
    /// decimal integer all yield `None` — they are treated as "no prior
    /// instance" and never abort startup.
    pub async fn read(&self) -> Option<u32> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("No readable lock record at {}: {err}", self.path.display());
                return None;
            }
        };

        match content.trim().parse::<u32>() {
            Ok(pid) if pid > 0 => Some(pid),
            _ => {
                warn!(
                    "Ignoring corrupt lock record at {}: {content:?}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Overwrite the record with `pid`, creating the parent directory if
    /// needed. Truncates any previous content.
    pub async fn write(&self, pid: u32) -> Result<(), UpdateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| UpdateError::LockWrite {
                    path: self.path.clone(),
                    source,
                })?;
        }

        fs::write(&self.path, pid.to_string())
            .await
            .map_err(|source| UpdateError::LockWrite {
                path: self.path.clone(),
                source,
            })?;

        debug!("Recorded pid {pid} at {}", self.path.display());
        Ok(())
    }
}
