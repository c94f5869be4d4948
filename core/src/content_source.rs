//! Repository contents API client
//!
//! - `ContentSource` trait: the two reads the catalog needs (list a
//!   directory, fetch one file envelope)
//! - `GithubContentSource`: HTTP implementation against
//!   `GET {api_base}/repos/{owner}/{repo}/contents/{path}?ref={branch}`
//!
//! Nothing here retries or caches; every call is one request.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use url::Url;

use crate::config::SourceConfig;
use crate::errors::{ConfigError, DescriptorReadError, DirectoryFetchError};
use crate::model::{DirEntry, FileEnvelope};

/// Media type the hosting API documents for the contents endpoint.
const CONTENTS_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Read-only access to a repository tree pinned to one reference.
///
/// The catalog loader only depends on this trait, so tests can swap in an
/// in-memory source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List the entries of a directory, in the order the source returns them.
    async fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, DirectoryFetchError>;

    /// Fetch the envelope of a single file.
    async fn fetch_file(&self, path: &str) -> Result<FileEnvelope, DescriptorReadError>;
}

/// `ContentSource` backed by the hosted repository contents API.
pub struct GithubContentSource {
    client: reqwest::Client,
    base: Url,
    owner: String,
    repo: String,
    branch: String,
}

impl GithubContentSource {
    /// Build a client with the configured User-Agent and timeout.
    pub fn new(config: &SourceConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(CONTENTS_MEDIA_TYPE));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;

        Self::with_client(client, config)
    }

    /// Creates a source with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, config: &SourceConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.api_base).map_err(|e| {
            ConfigError::Invalid(format!(
                "source.api_base '{}' is not a URL: {e}",
                config.api_base
            ))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "source.api_base '{}' cannot carry a path",
                config.api_base
            )));
        }

        Ok(Self {
            client,
            base,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
        })
    }

    /// URL of the contents endpoint for `path`. Path segments are
    /// percent-encoded individually, so names with spaces survive.
    pub fn contents_url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.branch);
        url
    }
}

fn status_text(status: reqwest::StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown Status").to_string()
}

#[async_trait]
impl ContentSource for GithubContentSource {
    async fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, DirectoryFetchError> {
        let url = self.contents_url(path);
        tracing::debug!(path, %url, "listing directory");

        let transport = |e: reqwest::Error| DirectoryFetchError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryFetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                status_text: status_text(status),
            });
        }

        let body = response.text().await.map_err(transport)?;
        serde_json::from_str::<Vec<DirEntry>>(&body).map_err(|e| DirectoryFetchError::Malformed {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn fetch_file(&self, path: &str) -> Result<FileEnvelope, DescriptorReadError> {
        let url = self.contents_url(path);
        tracing::debug!(path, %url, "fetching file");

        let transport = |e: reqwest::Error| DescriptorReadError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DescriptorReadError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                status_text: status_text(status),
            });
        }

        let body = response.text().await.map_err(transport)?;
        serde_json::from_str::<FileEnvelope>(&body).map_err(|e| DescriptorReadError::Envelope {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
