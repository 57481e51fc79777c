//! Errors raised while obtaining and unpacking artifacts.

use std::path::PathBuf;
use thiserror::Error;

/// Any of these ends the fetch; no partial result is returned.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: reqwest::StatusCode },

    /// Redirect without a usable target
    #[error("Redirect from {url} has no usable Location header")]
    MissingLocation { url: String },

    /// Artifact listing could not be decoded
    #[error("Invalid artifact listing from {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry would be written outside the extraction directory
    #[error("Archive {} contains unsafe entry {entry}", .archive.display())]
    UnsafeEntry { archive: PathBuf, entry: String },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| FetchError::Io { path, source }
    }
}
