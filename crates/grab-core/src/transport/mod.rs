//! HTTP transport seam.
//!
//! `Transport::fetch` performs one attempt: send the request, stream the body
//! into the caller's sink, return the response head. The production
//! implementation is `CurlTransport`; tests substitute scripted transports.

mod easy;
mod parse;

pub use easy::{CurlTransport, CHUNK_SIZE};
pub use parse::parse_headers;

use crate::request::Request;
use crate::retry::TransportError;
use std::io::Write;

/// Status and the response headers the downloader acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    /// `Content-Encoding` value if present.
    pub content_encoding: Option<String>,
    /// `Last-Modified` value if present (raw, unparsed).
    pub last_modified: Option<String>,
    /// `Content-Length` if present and numeric.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the server says the body is gzip-compressed.
    pub fn is_gzipped(&self) -> bool {
        self.content_encoding
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("gzip"))
    }
}

/// One request/response exchange.
pub trait Transport {
    /// Perform `request`, writing the body into `body`. The transport owns any
    /// connection for the duration of the call only; it is released on return.
    fn fetch(&mut self, request: &Request, body: &mut dyn Write)
        -> Result<ResponseHead, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn fetch(
        &mut self,
        request: &Request,
        body: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        (**self).fetch(request, body)
    }
}
