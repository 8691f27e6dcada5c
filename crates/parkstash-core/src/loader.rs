//! Sources of the parks dataset.
//!
//! The store only knows the [`ParksLoader`] trait. Two loaders ship with
//! the crate: `HttpLoader` fetches a JSON array over HTTP and `FileLoader`
//! reads one from disk.

use std::path::PathBuf;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{header, Client};
use tracing::debug;

use crate::error::LoaderError;
use crate::models::Park;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub trait ParksLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Park>, LoaderError>>;
}

/// Parse a dataset body, insisting on a top-level array.
pub fn parse_parks(body: &str) -> Result<Vec<Park>, LoaderError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LoaderError::InvalidData(format!("not JSON: {}", e)))?;
    if !value.is_array() {
        return Err(LoaderError::InvalidData(
            "expected array of parks".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| LoaderError::InvalidData(e.to_string()))
}

/// Loads the dataset with a GET request.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpLoader {
    client: Client,
    url: String,
}

impl HttpLoader {
    pub fn new(url: impl Into<String>) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, url))
    }

    /// Share an existing client's connection pool.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<Vec<Park>, LoaderError> {
        debug!(url = %self.url, "Fetching parks data");
        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        parse_parks(&body)
    }
}

impl ParksLoader for HttpLoader {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Park>, LoaderError>> {
        Box::pin(self.fetch())
    }
}

/// Loads the dataset from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Vec<Park>, LoaderError> {
        debug!(path = %self.path.display(), "Reading parks data");
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoaderError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_parks(&body)
    }
}

impl ParksLoader for FileLoader {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Park>, LoaderError>> {
        Box::pin(self.read())
    }
}
