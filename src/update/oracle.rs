use reqwest::Client;
use tracing::debug;

use crate::constants::VERSION_CHECK_TIMEOUT;
use crate::core::UpdateError;

/// Fetches the latest released version token from the version endpoint.
///
/// The endpoint serves a plaintext body containing a single version token,
/// optionally followed by whitespace. The oracle is stateless: every call
/// performs a fresh GET, and the result is never persisted.
///
/// The token is opaque — callers compare it byte-for-byte against the
/// embedded current version. No semantic-version ordering is applied, so a
/// published downgrade is picked up exactly like an upgrade.
pub struct VersionOracle {
    client: Client,
    url: String,
}

impl VersionOracle {
    /// Create an oracle against the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Fetch and trim the latest version token.
    ///
    /// The request carries this process's pid as a query parameter to defeat
    /// stale intermediary caches, and times out after a few seconds — the
    /// body is tiny, so a slow answer is as good as no answer.
    ///
    /// # Errors
    ///
    /// Transport failures and non-200 statuses both yield a transient
    /// [`UpdateError`]; callers skip the current check cycle on either.
    pub async fn fetch_latest_version(&self) -> Result<String, UpdateError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("pid", std::process::id())])
            .timeout(VERSION_CHECK_TIMEOUT)
            .send()
            .await
            .map_err(|source| UpdateError::Network {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| UpdateError::Network {
            url: self.url.clone(),
            source,
        })?;

        let version = body.trim().to_string();
        debug!("Version endpoint reports {version:?}");
        Ok(version)
    }
}
