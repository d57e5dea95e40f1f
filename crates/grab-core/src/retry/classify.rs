//! Classify transport errors into retry policy error kinds.

use super::error::TransportError;
use super::policy::ErrorKind;

/// libcurl `CURLE_UNSUPPORTED_PROTOCOL`. Also raised for a reply with no
/// `HTTP/` status line, which curl takes for HTTP/0.9 and refuses.
const CURLE_UNSUPPORTED_PROTOCOL: u32 = 1;

/// libcurl `CURLE_WEIRD_SERVER_REPLY`: status line could not be parsed.
const CURLE_WEIRD_SERVER_REPLY: u32 = 8;

/// Classify a curl error for retry decisions.
///
/// Only a timeout or a reply curl could not make sense of (garbage status line,
/// connection closed before any response) is worth another attempt.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.code() == CURLE_WEIRD_SERVER_REPLY || e.is_got_nothing() || is_garbage_status_line(e) {
        return ErrorKind::MalformedResponse;
    }
    ErrorKind::Other
}

fn is_garbage_status_line(e: &curl::Error) -> bool {
    e.code() == CURLE_UNSUPPORTED_PROTOCOL
        && e.extra_description().is_some_and(|d| d.contains("HTTP/0.9"))
}

/// Classify a transport error into an ErrorKind.
pub fn classify(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::Http(_) | TransportError::Sink(_) => ErrorKind::Other,
    }
}
