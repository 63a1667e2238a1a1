//! End-to-end `snapsolver check` runs against fake endpoints, through the
//! Swap Agent hand-off and the completed swap.

use std::path::Path;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Serve a fixed version token (`/latest...`) and release payload
/// (everything else) on an ephemeral local port.
fn spawn_endpoints(version: &str, payload: &[u8]) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let version = version.to_string();
    let payload = payload.to_vec();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = if request.url().starts_with("/latest") {
                tiny_http::Response::from_string(version.clone()).boxed()
            } else {
                tiny_http::Response::from_data(payload.clone()).boxed()
            };
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}")
}

/// `snapsolver check` pointed at a fake install in `dir` and the given
/// endpoint base. All configuration flows through the environment of the
/// child process only.
fn snapsolver_check(dir: &Path, base: &str) -> Command {
    let mut cmd = Command::cargo_bin("snapsolver").unwrap();
    cmd.arg("check")
        .env("SNAPSOLVER_DATA_DIR", dir)
        .env("SNAPSOLVER_VERSION_URL", format!("{base}/latest_version.txt"))
        .env(
            "SNAPSOLVER_PACKAGE_URL",
            format!("{base}/SnapSolver-latest"),
        )
        .env("SNAPSOLVER_INSTALL_PATH", dir.join("snapsolver-fake"))
        // Inherited by the spawned Swap Agent.
        .env("SNAPSOLVER_SWAP_GRACE_MS", "100");
    cmd
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if condition() {
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    panic!("condition not reached within 10s");
}

#[test]
fn new_version_is_staged_handed_off_and_swapped() {
    let dir = TempDir::new().unwrap();
    let installed = dir.path().join("snapsolver-fake");
    std::fs::write(&installed, b"installed-binary").unwrap();

    // Put the real Swap Agent beside the fake install, as a deployment would.
    let agent_name = format!("snapsolver-updater{}", std::env::consts::EXE_SUFFIX);
    std::fs::copy(
        env!("CARGO_BIN_EXE_snapsolver-updater"),
        dir.path().join(agent_name),
    )
    .unwrap();

    let base = spawn_endpoints("9.9.9", b"release-payload");

    snapsolver_check(dir.path(), &base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Update staged"));

    // The host has exited; the agent finishes the swap on its own.
    wait_until(|| {
        std::fs::read(&installed)
            .map(|content| content == b"release-payload")
            .unwrap_or(false)
    });
    assert_eq!(
        std::fs::read(dir.path().join("snapsolver-fake.old")).unwrap(),
        b"installed-binary"
    );
    assert!(!dir.path().join("snapsolver-fake.new").exists());
}

#[test]
fn equal_version_reports_up_to_date_and_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let installed = dir.path().join("snapsolver-fake");
    std::fs::write(&installed, b"installed-binary").unwrap();

    // The binary under test reports its crate version.
    let base = spawn_endpoints(env!("CARGO_PKG_VERSION"), b"release-payload");

    snapsolver_check(dir.path(), &base)
        .assert()
        .success()
        .stdout(predicate::str::contains("latest version"));

    assert_eq!(std::fs::read(&installed).unwrap(), b"installed-binary");
    assert!(!dir.path().join("snapsolver-fake.new").exists());
    assert!(!dir.path().join("snapsolver-fake.old").exists());
}

#[test]
fn unreachable_endpoint_surfaces_a_check_failure() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("snapsolver-fake"), b"installed-binary").unwrap();

    // Nothing listens on port 1.
    snapsolver_check(dir.path(), "http://127.0.0.1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Update check failed"));

    assert!(!dir.path().join("snapsolver-fake.new").exists());
}
