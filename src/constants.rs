//! Global constants used throughout the SnapSolver codebase.
//!
//! This module contains timeout durations, endpoint URLs, and filesystem
//! naming conventions that are used across multiple modules. Defining them
//! centrally improves maintainability and makes magic numbers more
//! discoverable.

use std::time::Duration;

/// Remote endpoint serving the latest released version as plain text.
///
/// The body contains a single version token, optionally followed by
/// whitespace. Fetched fresh on every check; never cached locally.
pub const VERSION_ENDPOINT: &str =
    "https://raw.githubusercontent.com/leob426/SnapSolver/main/latest_version.txt";

/// Remote endpoint serving the raw binary content of the newest release.
pub const PACKAGE_ENDPOINT: &str =
    "https://github.com/leob426/SnapSolver/releases/latest/download/SnapSolver-latest";

/// Timeout for the version check request (5 seconds).
///
/// Version bodies are tiny; anything slower than this is treated as a
/// transient network failure and the check cycle is skipped.
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection-establishment timeout for the package download (10 seconds).
///
/// Only connecting is bounded. The streaming read itself is unbounded
/// because release artifacts may be tens of megabytes on slow links.
pub const DOWNLOAD_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Buffer capacity for the chunked package download (8 KiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Interval between background update checks (60 seconds).
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Grace period the Swap Agent waits before touching the installed
/// executable (2.5 seconds).
///
/// The caller terminates immediately after spawning the agent; this delay
/// lets the OS release any file handle or executable lock on the old binary.
pub const SWAP_GRACE_PERIOD: Duration = Duration::from_millis(2500);

/// File name of the PID lock record inside the application data directory.
pub const LOCK_FILE_NAME: &str = "snapsolver.lock";

/// File name of the optional configuration overrides inside the application
/// data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Suffix appended to the installed executable's file name to form the
/// download staging path (e.g. `snapsolver.new`).
pub const STAGING_SUFFIX: &str = "new";

/// Suffix appended to the installed executable's file name to form the
/// backup path during a swap (e.g. `snapsolver.old`).
pub const BACKUP_SUFFIX: &str = "old";

/// Base name of the Swap Agent executable, expected beside the installed
/// binary. The platform executable suffix is appended at lookup time.
pub const UPDATER_BIN_NAME: &str = "snapsolver-updater";
