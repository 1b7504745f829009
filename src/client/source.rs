use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{BuildMode, DocsConfig};
use crate::error::AppError;
use crate::models::document::DocIndex;

/// Where the documentation client obtains the index from.
///
/// Abstracted as a trait so tests can count and delay fetches without a
/// running server.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetch the full index.
    async fn fetch(&self) -> Result<DocIndex, AppError>;
}

/// Fetches the index over HTTP from the dev endpoint or the static asset.
pub struct HttpIndexSource {
    client: reqwest::Client,
    url: String,
}

impl HttpIndexSource {
    /// Create a source for `base_url`, picking `/api/docs` in development
    /// and `/docs-index.json` in production. Requests time out after
    /// `timeout` so a hung server cannot stall every waiting caller.
    pub fn new(base_url: &str, mode: BuildMode, timeout: Duration) -> Result<Self, AppError> {
        Self::from_url(index_url(base_url, mode), timeout)
    }

    /// Create a source fetching exactly `url`.
    pub fn from_url(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &DocsConfig) -> Result<Self, AppError> {
        Self::new(&config.base_url, config.mode, config.fetch_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The index location for a base URL and build mode.
pub fn index_url(base_url: &str, mode: BuildMode) -> String {
    let base = base_url.trim_end_matches('/');
    match mode {
        BuildMode::Development => format!("{base}/api/docs"),
        BuildMode::Production => format!("{base}/{}", crate::indexing::phases::INDEX_ASSET_NAME),
    }
}

#[async_trait]
impl IndexSource for HttpIndexSource {
    async fn fetch(&self) -> Result<DocIndex, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch '{}': {}", self.url, e)))?
            .error_for_status()
            .map_err(|e| AppError::Fetch(format!("Index request failed: {e}")))?;

        response
            .json::<DocIndex>()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid index from '{}': {}", self.url, e)))
    }
}

/// Reads an emitted `docs-index.json` from disk.
pub struct FileIndexSource {
    path: PathBuf,
}

impl FileIndexSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndexSource for FileIndexSource {
    async fn fetch(&self) -> Result<DocIndex, AppError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Fetch(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Parse(format!("Invalid index in '{}': {}", self.path.display(), e))
        })
    }
}

/// Pick the index source for an explicit location, or from configuration.
///
/// An `http(s)` location is fetched as-is and any other location is read as
/// a local file. Without a location the index is fetched from
/// `config.base_url`, at the endpoint selected by `config.mode`.
pub fn open_index_source(
    location: Option<&str>,
    config: &DocsConfig,
) -> Result<Arc<dyn IndexSource>, AppError> {
    match location {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(Arc::new(HttpIndexSource::from_url(url, config.fetch_timeout())?))
        }
        Some(path) => Ok(Arc::new(FileIndexSource::new(path))),
        None => Ok(Arc::new(HttpIndexSource::from_config(config)?)),
    }
}
