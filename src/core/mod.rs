//! Core types and error handling for SnapSolver.
//!
//! The error type here carries the failure taxonomy the update subsystem is
//! built around: transient network failures are recovered locally by skipping
//! the current check cycle, filesystem failures abort a single update attempt,
//! and process-control failures are advisory and swallowed by the caller.
//! Nothing in this subsystem may take the host process down with it.

pub mod error;

pub use error::UpdateError;
