//! Integration test suite for SnapSolver
//!
//! End-to-end tests that exercise the real binaries and the public crate
//! API. These run quickly and are executed in CI on every commit.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Tests are organized by functionality area:
//! - **instance_supervision**: sequential-launch lock-file behavior
//! - **orchestrator_e2e**: the `snapsolver check` flow against fake
//!   version/package endpoints, through the Swap Agent hand-off
//! - **swap_agent**: the `snapsolver-updater` binary's rename protocol

mod instance_supervision;
mod orchestrator_e2e;
mod swap_agent;
