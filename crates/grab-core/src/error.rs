//! Errors surfaced by `Downloader::download`.

use crate::retry::{classify, ErrorKind, TransportError};
use std::io;
use std::path::PathBuf;

/// Every way a download can fail. Callers can tell a pre-flight conflict from a
/// network failure, a decompression failure and a filesystem failure by variant.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Destination already holds data and overwrite was not requested.
    /// Raised before any network access.
    #[error("file exists: {}", .path.display())]
    Exists { path: PathBuf },

    /// URL could not be parsed or names no host.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Retry count below -1.
    #[error("invalid retry count {0} (expected -1 or a non-negative number)")]
    InvalidRetry(i64),

    /// Network failure: either non-retryable, or retryable with the budget spent.
    #[error("transfer failed: {0}")]
    Transport(#[from] TransportError),

    /// Body declared `Content-Encoding: gzip` but could not be decoded (or decoded to nothing).
    /// `path` is the staging file; None for in-memory downloads.
    #[error(
        "could not unzip {}: {source}",
        .path.as_ref().map_or_else(|| "response body".to_string(), |p| p.display().to_string())
    )]
    Decompress {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Staging file, directory creation, final move or timestamp update failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DownloadError {
    pub(crate) fn storage(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        DownloadError::Storage {
            action,
            path: path.into(),
            source,
        }
    }

    /// Retry classification of a transport failure; None for non-network errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DownloadError::Transport(e) => Some(classify(e)),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == Some(ErrorKind::Timeout)
    }
}
