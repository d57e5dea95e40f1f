//! Curl easy-handle transport.
//!
//! One `Easy` per attempt; the handle (and its connection) is dropped when
//! `fetch` returns, on every path.

use super::parse::parse_headers;
use super::{ResponseHead, Transport};
use crate::request::Request;
use crate::retry::TransportError;
use ::curl::easy::{Easy, HttpVersion, List};
use std::io::{self, Write};
use std::str;
use std::time::Duration;

/// Receive buffer size: the body reaches the sink in chunks of at most this many bytes.
pub const CHUNK_SIZE: usize = 1500;

/// Redirect hops followed before giving up.
const MAX_REDIRECTIONS: u32 = 10;

/// libcurl measures stalls in whole seconds.
const MIN_STALL_WINDOW: Duration = Duration::from_secs(1);

/// libcurl reads a zero connect timeout as "use the 300 s default".
const MIN_CONNECT_TIMEOUT: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        CurlTransport
    }

    fn configure(easy: &mut Easy, request: &Request) -> Result<(), ::curl::Error> {
        easy.url(&request.url)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        // Keep-Alive / Connection headers are HTTP/1.1 only.
        easy.http_version(HttpVersion::V11)?;
        easy.buffer_size(CHUNK_SIZE)?;

        // Timeout applies to connecting and to any stall while reading, like a
        // socket timeout; a slow but steady transfer is never cut off.
        if let Some(timeout) = request.timeout {
            let (connect, stall) = timeout_windows(timeout);
            easy.connect_timeout(connect)?;
            easy.low_speed_limit(1)?;
            easy.low_speed_time(stall)?;
        }

        let mut list = List::new();
        for (name, value) in &request.headers {
            list.append(&format!("{}: {}", name, value))?;
        }
        easy.http_headers(list)?;
        Ok(())
    }
}

/// Connect timeout and stall window for a per-attempt timeout.
fn timeout_windows(timeout: Duration) -> (Duration, Duration) {
    (timeout.max(MIN_CONNECT_TIMEOUT), timeout.max(MIN_STALL_WINDOW))
}

impl Transport for CurlTransport {
    fn fetch(
        &mut self,
        request: &Request,
        body: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut sink_error: Option<io::Error> = None;

        let mut easy = Easy::new();
        Self::configure(&mut easy, request).map_err(TransportError::Curl)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        header_lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(TransportError::Curl)?;
            transfer
                .write_function(|data| match body.write_all(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_error = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(TransportError::Curl)?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if e.is_write_error() {
                if let Some(io_err) = sink_error.take() {
                    return Err(TransportError::Sink(io_err));
                }
            }
            return Err(TransportError::Curl(e));
        }

        let mut head = parse_headers(&header_lines);
        head.status = easy.response_code().map_err(TransportError::Curl)?;
        tracing::debug!(
            url = %request.url,
            status = head.status,
            encoding = ?head.content_encoding,
            "response received"
        );
        Ok(head)
    }
}
