//! Request descriptor sent on every attempt.
//!
//! A `Request` is built once per `download` call and reused unchanged by every
//! retry: URL, the forged browser headers and the per-attempt timeout.

mod headers;

pub use headers::{forge_browser_headers, host_of, USER_AGENT};

use crate::error::DownloadError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    /// Ordered (name, value) pairs; sent in this order.
    pub headers: Vec<(&'static str, String)>,
    /// Connect / stall timeout for one attempt. None = wait indefinitely.
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, DownloadError> {
        Ok(Self {
            url: url.to_string(),
            headers: forge_browser_headers(url)?,
            timeout,
        })
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
