//! Sequential-launch behavior of the lock store and instance supervisor,
//! driven through the public crate API.

use snapsolver::instance::{InstanceSupervisor, LockStore};
use tempfile::TempDir;

#[tokio::test]
async fn lock_store_round_trips_through_public_api() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapsolver.lock");

    LockStore::new(path.clone()).write(9001).await.unwrap();
    assert_eq!(LockStore::new(path).read().await, Some(9001));
}

#[tokio::test]
async fn corrupt_lock_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapsolver.lock");
    std::fs::write(&path, "definitely not a pid").unwrap();

    assert_eq!(LockStore::new(path).read().await, None);
}

/// Two launches in sequence: the second supersedes the first. The "first
/// instance" is a stand-in child process whose PID the first launch left in
/// the lock file.
#[cfg(unix)]
#[tokio::test]
async fn second_launch_kills_recorded_predecessor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapsolver.lock");

    let mut predecessor = std::process::Command::new("sleep")
        .arg("30")
        .spawn()
        .expect("spawn stand-in process");
    LockStore::new(path.clone())
        .write(predecessor.id())
        .await
        .unwrap();

    let supervisor = InstanceSupervisor::new(LockStore::new(path.clone()));
    supervisor.supersede_previous_instance().await.unwrap();

    // The lock now names the second launch.
    assert_eq!(
        LockStore::new(path).read().await,
        Some(std::process::id())
    );

    // And a termination was issued against the first.
    let mut terminated = false;
    for _ in 0..100 {
        if predecessor.try_wait().expect("try_wait").is_some() {
            terminated = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(terminated, "recorded predecessor was not terminated");
}

/// A recorded PID with no live process behind it is simply superseded.
#[tokio::test]
async fn stale_record_is_overwritten_without_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapsolver.lock");
    LockStore::new(path.clone()).write(4_194_000).await.unwrap();

    let supervisor = InstanceSupervisor::new(LockStore::new(path.clone()));
    supervisor.supersede_previous_instance().await.unwrap();

    assert_eq!(
        LockStore::new(path).read().await,
        Some(std::process::id())
    );
}
