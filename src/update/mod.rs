//! Self-update functionality for SnapSolver.
//!
//! This module keeps the installed binary current with the published
//! release, using a two-process hand-off because a running executable
//! cannot overwrite itself on common platforms.
//!
//! # Update Process Flow
//!
//! ```text
//! 1. Version Check
//!    ├── GET the plaintext version endpoint (cache-defeating pid parameter)
//!    └── Compare byte-for-byte against the embedded current version
//!
//! 2. Download
//!    ├── Stream the release artifact to a staging file beside the binary
//!    └── Abort this attempt on any non-200 or transport error
//!
//! 3. Hand-off
//!    ├── Locate the co-located Swap Agent executable
//!    ├── Spawn it detached with (installed_exe, staging_file)
//!    └── Exit the host so the agent can replace the locked binary
//!
//! 4. Swap (separate process, src/bin/updater.rs)
//!    WAIT → BACKUP → PROMOTE → RELAUNCH → DONE (FAILED rolls back)
//! ```
//!
//! # Components
//!
//! - [`VersionOracle`] — fetches the latest version token; stateless.
//! - [`PackageFetcher`] — streams the release artifact to disk in fixed-size
//!   chunks; artifacts may be tens of megabytes.
//! - [`UpdateOrchestrator`] — the compare/download/hand-off decision.
//! - [`UpdateListener`] — repeats background checks on a fixed interval.
//! - [`swap`] — the Swap Agent state machine run by `snapsolver-updater`.
//!
//! # Failure policy
//!
//! Network failures skip the current cycle and are only surfaced on
//! interactive checks. Filesystem failures abort the attempt but leave the
//! host running on the installed version. See [`crate::core::error`].

pub mod fetcher;
pub mod listener;
pub mod oracle;
pub mod orchestrator;
pub mod swap;


pub use fetcher::PackageFetcher;
pub use listener::UpdateListener;
pub use oracle::VersionOracle;
pub use orchestrator::{CheckOutcome, UpdateCheck, UpdateOrchestrator};
pub use swap::{SwapAgent, SwapPhase, SwapReport};
