use std::path::Path;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::constants::{DOWNLOAD_CHUNK_SIZE, DOWNLOAD_CONNECT_TIMEOUT};
use crate::core::UpdateError;

/// Streams the release artifact from the package endpoint to a path on disk.
///
/// The body is written in fixed-size chunks as it arrives — release
/// artifacts may be tens of megabytes, so the payload is never buffered
/// whole in memory. Only connection establishment is bounded by a timeout;
/// the streaming read itself runs as long as bytes keep flowing.
///
/// The fetcher owns the destination file until it returns: on any error the
/// partially written file is removed, so callers never observe a truncated
/// payload at the staging path.
pub struct PackageFetcher {
    client: Client,
    url: String,
    show_progress: bool,
}

impl PackageFetcher {
    /// Create a fetcher against the given artifact URL.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed (TLS backend
    /// initialization), reported as a network-class [`UpdateError`].
    pub fn new(url: impl Into<String>) -> Result<Self, UpdateError> {
        let url = url.into();
        let client = Client::builder()
            .connect_timeout(DOWNLOAD_CONNECT_TIMEOUT)
            .build()
            .map_err(|source| UpdateError::Network {
                url: url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            url,
            show_progress: false,
        })
    }

    /// Configure whether to render a terminal progress bar while
    /// downloading. Off by default; interactive checks turn it on.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download the artifact to `destination`.
    ///
    /// # Errors
    ///
    /// A non-200 response or a transport error mid-stream yields a transient
    /// [`UpdateError`]; a write failure yields a filesystem-class error. In
    /// every error case the partial file is deleted before returning.
    pub async fn fetch_package(&self, destination: &Path) -> Result<(), UpdateError> {
        debug!("Downloading {} to {}", self.url, destination.display());

        let result = self.stream_to(destination).await;
        if result.is_err() {
            // Never leave a truncated payload behind.
            let _ = fs::remove_file(destination).await;
        }
        result
    }

    async fn stream_to(&self, destination: &Path) -> Result<(), UpdateError> {
        let network = |source| UpdateError::Network {
            url: self.url.clone(),
            source,
        };
        let staging = |source| UpdateError::Staging {
            path: destination.to_path_buf(),
            source,
        };

        let response = self.client.get(&self.url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bar = self.progress_bar(response.content_length());

        let file = fs::File::create(destination).await.map_err(staging)?;
        let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            writer.write_all(&chunk).await.map_err(staging)?;
            written += chunk.len() as u64;
            if let Some(bar) = &bar {
                bar.set_position(written);
            }
        }

        writer.flush().await.map_err(staging)?;
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        info!(
            "Downloaded {written} bytes to {}",
            destination.display()
        );
        Ok(())
    }

    fn progress_bar(&self, total: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{prefix:.bold} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .unwrap(),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        bar.set_prefix("Downloading");
        Some(bar)
    }
}
