//! SnapSolver - screenshot-to-answer desktop assistant
//!
//! This crate contains the self-update and instance-supervision core of
//! SnapSolver: the state machines for safe binary replacement,
//! crash-tolerant process hand-off, and single-instance enforcement across
//! process restarts. The windowed front end (screenshot capture, the
//! language-model exchange, answer rendering, API-key handling) is a
//! separate layer that consumes this crate through two seams: a function to
//! trigger an update check and the [`notify::Notifier`] sink for
//! user-visible notices.
//!
//! # Architecture Overview
//!
//! Two executables cooperate:
//!
//! - **`snapsolver`** — the host. On startup it supersedes any previously
//!   recorded instance, performs one silent update check, then keeps a
//!   background listener running for the lifetime of the process.
//! - **`snapsolver-updater`** — the Swap Agent. Spawned by the host when a
//!   new version has been staged, it waits for the host to exit, moves the
//!   installed binary aside, promotes the staged one, and relaunches it.
//!
//! The hand-off is a two-process protocol because a running binary cannot
//! overwrite itself on common platforms: the host stages the download,
//! spawns the agent with `(installed_exe, staging_file)`, and exits.
//!
//! # Core Modules
//!
//! - [`instance`] - PID lock store and instance supervision
//! - [`update`] - version oracle, package fetcher, orchestrator, listener,
//!   and the swap state machine
//! - [`config`] - explicit configuration passed into every component
//! - [`notify`] - user-visible notices for interactive checks
//! - [`core`] - the error taxonomy the failure policy is built on
//! - [`cli`] - command-line surface of the host binary
//!
//! # Failure Policy
//!
//! No error in this subsystem may crash the host: transient network errors
//! skip the current check cycle, filesystem errors abort the current update
//! attempt, and process-control errors during supersession are swallowed.
//! Every failure degrades to "update skipped, application continues on the
//! current version".

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod instance;
pub mod notify;
pub mod update;

pub use self::config::UpdateConfig;
pub use self::core::UpdateError;
