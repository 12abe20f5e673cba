//! Downloads sticker source images over HTTP.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// HTTP connect timeout for source downloads.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded image downloader.
#[derive(Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

/// Accept only absolute http(s) URLs.
pub fn parse_source_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid image_url: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidInput(format!(
            "image_url scheme '{}' is not supported",
            other
        ))),
    }
}

impl ImageFetcher {
    pub fn new(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    /// Build the shared outbound HTTP client.
    pub fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to build HTTP client: {}", e)))
    }

    /// Download `url`, refusing bodies larger than the configured limit.
    pub async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Upstream(format!("Source image request failed: {}", e)))?;

        if let Some(len) = response.content_length()
            && len as usize > self.max_bytes
        {
            return Err(AppError::InvalidInput(format!(
                "Source image is {} bytes, limit is {}",
                len, self.max_bytes
            )));
        }

        let mut data = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if data.len() + chunk.len() > self.max_bytes {
                return Err(AppError::InvalidInput(format!(
                    "Source image exceeds {} bytes",
                    self.max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = data.len(), "Fetched source image");
        Ok(data)
    }
}
