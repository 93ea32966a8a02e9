//! Origin document fetchers

use crate::{AcquireError, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Retrieves the raw text of an origin document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP GET through reqwest
///
/// Any non-success status is an error; redirects are followed by the client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, default headers, timeouts)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching origin over HTTP");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Dispatches on the shape of the origin URL
///
/// `http://` and `https://` go to [`HttpFetcher`]; `file://` URLs and plain
/// paths are read from disk.
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    http: HttpFetcher,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http(http: HttpFetcher) -> Self {
        Self { http }
    }

    /// True for URLs that must be fetched over the network
    pub fn is_remote(url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    async fn read_local(path: &Path) -> Result<String> {
        debug!(path = %path.display(), "reading origin from disk");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AcquireError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl Fetcher for SourceFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if Self::is_remote(url) {
            return self.http.fetch(url).await;
        }

        let path = url.strip_prefix("file://").unwrap_or(url);
        Self::read_local(Path::new(path)).await
    }
}
