//! Transport error type for retry classification.

use std::fmt;

/// Error returned by a single attempt (curl failure, HTTP error, or local sink failure).
/// Kept separate from `DownloadError` so the retry loop can classify it first.
#[derive(Debug)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, malformed reply, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the body to memory or the staging file failed. Not retried.
    Sink(std::io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Http(code) => write!(f, "HTTP {}", code),
            TransportError::Sink(e) => write!(f, "write body: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Curl(e) => Some(e),
            TransportError::Sink(e) => Some(e),
            TransportError::Http(_) => None,
        }
    }
}
