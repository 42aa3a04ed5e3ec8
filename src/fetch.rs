//! Downloads a single resolved asset URL to disk.
//!
//! The [`Transport`] trait isolates the HTTP GET so tests can assert on call
//! counts with a `mockall` mock; [`download_pdf`] owns the file-name
//! derivation and the artifact-existence check.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(String),
    Io(std::io::Error),
    Http(reqwest::Error),
    Status { url: String, status: StatusCode },
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e)
    }
}

/// Result of a [`download_pdf`] call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The artifact was fetched and written to this path.
    Downloaded(PathBuf),
    /// The artifact was already on disk; no network request was made.
    AlreadyExists(PathBuf),
}

/// One blocking HTTP GET, streamed to a destination file.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Real transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        if let Err(e) = copy_body(response, dest).await {
            // Do not leave a truncated artifact behind.
            let _ = fs::remove_file(dest);
            return Err(e);
        }
        Ok(())
    }
}

async fn copy_body(mut response: reqwest::Response, dest: &Path) -> Result<(), FetchError> {
    let mut file = File::create(dest)?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
    }
    Ok(())
}

/// Download one resolved URL into `out_dir`.
///
/// The file name is the base name of the URL path, with `.pdf` appended when
/// the suffix is missing (case-insensitive). The output directory is created
/// if needed. This function is the single source of truth for "does this
/// artifact already exist": when the destination is present it returns
/// [`FetchOutcome::AlreadyExists`] without touching the transport.
pub async fn download_pdf(
    transport: &dyn Transport,
    url: &str,
    out_dir: &Path,
) -> Result<FetchOutcome, FetchError> {
    let dest = out_dir.join(file_name_for(url)?);

    fs::create_dir_all(out_dir)?;

    if dest.is_file() {
        debug!(path = %dest.display(), "File already exists, skipping download");
        return Ok(FetchOutcome::AlreadyExists(dest));
    }

    transport.fetch_to_file(url, &dest).await?;
    info!(url = %url, path = %dest.display(), "Downloaded");
    Ok(FetchOutcome::Downloaded(dest))
}

/// Destination file name for a resolved URL.
fn file_name_for(url: &str) -> Result<String, FetchError> {
    let parsed =
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

    let base = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");
    if base.is_empty() {
        return Err(FetchError::InvalidUrl(format!(
            "could not determine file name from {url}"
        )));
    }

    let mut name = base.to_string();
    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    Ok(name)
}
