//! Error types for the update and instance-supervision subsystem.
//!
//! Errors fall into three classes with different recovery policies:
//!
//! - **Transient network** ([`UpdateError::Network`],
//!   [`UpdateError::UnexpectedStatus`]): the current check cycle is skipped.
//!   Background checks log and move on; interactive checks surface a notice.
//! - **Filesystem** ([`UpdateError::AgentMissing`], [`UpdateError::Staging`],
//!   [`UpdateError::AgentSpawn`], [`UpdateError::LockWrite`]): fatal to the
//!   current update attempt, never to the host process, which keeps running
//!   the installed version.
//! - **Process control**: failures to terminate a predecessor instance are
//!   swallowed at the call site and never reach this type — superseding is
//!   advisory, and the new instance's own lock write still makes it the
//!   recorded primary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the update subsystem.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// A request to a remote endpoint failed at the transport level
    /// (connection refused, DNS failure, timeout, interrupted body).
    #[error("request to {url} failed: {source}")]
    Network {
        /// The endpoint that was being contacted.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A remote endpoint answered with a non-success status code.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// The endpoint that answered.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The Swap Agent executable is not present beside the installed binary.
    ///
    /// The update cannot proceed without it: the running executable cannot
    /// replace itself on platforms that lock running binaries.
    #[error("updater helper not found at {path}")]
    AgentMissing {
        /// Where the agent was expected.
        path: PathBuf,
    },

    /// Writing the downloaded payload to the staging path failed.
    #[error("failed to write staged download to {path}: {source}")]
    Staging {
        /// The staging path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The Swap Agent executable could not be spawned.
    #[error("failed to launch updater helper {path}: {source}")]
    AgentSpawn {
        /// Path of the agent that failed to start.
        path: PathBuf,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The instance lock record could not be written.
    #[error("failed to record instance lock at {path}: {source}")]
    LockWrite {
        /// The lock file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    /// Whether this error belongs to the transient-network class.
    ///
    /// Transient errors are expected in normal operation (offline laptop,
    /// flaky Wi-Fi, rate-limited CDN) and only skip the current check cycle.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::UnexpectedStatus { .. })
    }
}
