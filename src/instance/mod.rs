//! Single-instance supervision across process restarts.
//!
//! SnapSolver enforces at-most-one-primary-instance by convention: a lock
//! file in the application data directory records the PID of the recorded
//! primary, and every starting instance kills the recorded predecessor and
//! records itself. This is advisory supervision, not a hard mutual-exclusion
//! guarantee — a slow-to-exit predecessor can still be executing briefly
//! while the new instance starts up.
//!
//! Components:
//!
//! - [`LockStore`] — persistence of the single PID record. Reads fail softly:
//!   a missing, empty, or corrupt lock file is simply "no prior instance".
//! - [`InstanceSupervisor`] — the startup sequence: read, kill, overwrite.
//!   Runs exactly once per process start, before any update check begins.

pub mod lock;
pub mod supervisor;

pub use lock::LockStore;
pub use supervisor::InstanceSupervisor;
