//! Runtime configuration for the update and instance-supervision subsystem.
//!
//! All components take an explicit [`UpdateConfig`] instead of reading global
//! state, so the version oracle, package fetcher, and Swap Agent hand-off can
//! be pointed at fake endpoints and temporary directories in tests.
//!
//! Configuration is resolved in three layers, later layers winning:
//!
//! 1. compiled-in defaults from [`crate::constants`],
//! 2. an optional `config.toml` in the application data directory,
//! 3. `SNAPSOLVER_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CHECK_INTERVAL, CONFIG_FILE_NAME, LOCK_FILE_NAME, PACKAGE_ENDPOINT, STAGING_SUFFIX,
    SWAP_GRACE_PERIOD, UPDATER_BIN_NAME, VERSION_ENDPOINT,
};

/// Configuration shared by the update subsystem's components.
///
/// Built once at startup via [`UpdateConfig::load`] and passed by reference
/// (or cloned — it is a handful of strings and paths) into each component's
/// constructor.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Version of the running binary, compared byte-for-byte against the
    /// token served by the version endpoint. No semantic-version parsing.
    pub current_version: String,
    /// Endpoint returning the latest released version as plain text.
    pub version_url: String,
    /// Endpoint returning the raw bytes of the newest release binary.
    pub package_url: String,
    /// Path of the installed executable that a swap replaces.
    pub install_path: PathBuf,
    /// Per-OS writable application data directory (lock file, config file).
    pub data_dir: PathBuf,
    /// Interval between background update checks.
    pub check_interval: Duration,
    /// Grace period the Swap Agent waits for the caller to exit.
    pub swap_grace_period: Duration,
}

/// Optional overrides read from `config.toml` in the data directory.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    version_url: Option<String>,
    package_url: Option<String>,
    check_interval_secs: Option<u64>,
}

impl UpdateConfig {
    /// Resolve the full configuration: defaults, then the optional config
    /// file, then environment variables.
    ///
    /// Creates the application data directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Fails if no data directory can be determined for this OS, if the data
    /// directory cannot be created, if the installed executable path cannot
    /// be resolved, or if an existing config file is not valid TOML.
    pub async fn load() -> Result<Self> {
        let data_dir = resolve_data_dir()?;
        fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let mut config = Self {
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            version_url: VERSION_ENDPOINT.to_string(),
            package_url: PACKAGE_ENDPOINT.to_string(),
            install_path: std::env::current_exe()
                .context("Failed to resolve the running executable path")?,
            data_dir,
            check_interval: CHECK_INTERVAL,
            swap_grace_period: SWAP_GRACE_PERIOD,
        };

        config.apply_file_overrides().await?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Path of the PID lock record.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE_NAME)
    }

    /// Staging path the package fetcher downloads into, beside the installed
    /// executable (e.g. `snapsolver.new`).
    pub fn staging_path(&self) -> PathBuf {
        path_with_suffix(&self.install_path, STAGING_SUFFIX)
    }

    /// Expected location of the Swap Agent, co-located with the installed
    /// executable.
    pub fn agent_path(&self) -> PathBuf {
        let dir = self.install_path.parent().unwrap_or_else(|| Path::new("."));
        dir.join(format!("{}{}", UPDATER_BIN_NAME, std::env::consts::EXE_SUFFIX))
    }

    async fn apply_file_overrides(&mut self) -> Result<()> {
        let path = self.data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Applying overrides from {}", path.display());

        if let Some(url) = file.version_url {
            self.version_url = url;
        }
        if let Some(url) = file.package_url {
            self.package_url = url;
        }
        if let Some(secs) = file.check_interval_secs {
            self.check_interval = Duration::from_secs(secs);
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SNAPSOLVER_VERSION_URL") {
            self.version_url = url;
        }
        if let Ok(url) = std::env::var("SNAPSOLVER_PACKAGE_URL") {
            self.package_url = url;
        }
        if let Ok(path) = std::env::var("SNAPSOLVER_INSTALL_PATH") {
            self.install_path = PathBuf::from(path);
        }
        if let Ok(secs) = std::env::var("SNAPSOLVER_CHECK_INTERVAL_SECS")
            && let Ok(secs) = secs.parse()
        {
            self.check_interval = Duration::from_secs(secs);
        }
    }
}

/// Per-OS application data directory: `%APPDATA%\snapsolver` on Windows,
/// `~/Library/Application Support/snapsolver` on macOS, `~/.config/snapsolver`
/// elsewhere. `SNAPSOLVER_DATA_DIR` overrides it for tests.
fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SNAPSOLVER_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    Ok(dirs::config_dir()
        .context("Could not determine a writable application data directory")?
        .join("snapsolver"))
}

/// Derive a sibling path by appending `.suffix` to the file name, keeping the
/// original extension in place (`snapsolver.exe` -> `snapsolver.exe.new`).
pub(crate) fn path_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    out.set_file_name(format!(
        "{}.{suffix}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    out
}
