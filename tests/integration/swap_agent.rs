//! The `snapsolver-updater` binary: rename protocol, rollback, exit status.

use assert_cmd::Command;
use tempfile::TempDir;

fn updater() -> Command {
    let mut cmd = Command::cargo_bin("snapsolver-updater").unwrap();
    // Keep the wait phase short; the "caller" in these tests has already
    // exited.
    cmd.env("SNAPSOLVER_SWAP_GRACE_MS", "50");
    cmd
}

#[test]
fn swap_promotes_staged_binary_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("snapsolver");
    let new = dir.path().join("snapsolver.new");
    std::fs::write(&old, b"old-binary").unwrap();
    std::fs::write(&new, b"new-binary").unwrap();

    updater().arg(&old).arg(&new).assert().success();

    // Exactly one file at the installed path, holding the new content, plus
    // the backup at the deterministic path.
    assert_eq!(std::fs::read(&old).unwrap(), b"new-binary");
    assert_eq!(
        std::fs::read(dir.path().join("snapsolver.old")).unwrap(),
        b"old-binary"
    );
    assert!(!new.exists());
}

#[test]
fn swap_overwrites_a_stale_backup() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("snapsolver");
    let new = dir.path().join("snapsolver.new");
    std::fs::write(&old, b"old-binary").unwrap();
    std::fs::write(&new, b"new-binary").unwrap();
    std::fs::write(dir.path().join("snapsolver.old"), b"ancient-binary").unwrap();

    updater().arg(&old).arg(&new).assert().success();

    assert_eq!(
        std::fs::read(dir.path().join("snapsolver.old")).unwrap(),
        b"old-binary"
    );
}

#[test]
fn missing_staged_binary_restores_the_original() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("snapsolver");
    std::fs::write(&old, b"old-binary").unwrap();

    updater()
        .arg(&old)
        .arg(dir.path().join("snapsolver.new"))
        .assert()
        .failure();

    // The backup step already ran, so the agent rolled the original back.
    assert_eq!(std::fs::read(&old).unwrap(), b"old-binary");
    assert!(!dir.path().join("snapsolver.old").exists());
}

#[test]
fn rejects_a_single_argument() {
    Command::cargo_bin("snapsolver-updater")
        .unwrap()
        .arg("/tmp/only-one-path")
        .assert()
        .failure();
}
