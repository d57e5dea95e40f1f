//! Browser-like request headers.
//!
//! Some servers refuse script-looking clients, so every request carries the
//! header set of a desktop Firefox on Windows 7.

use crate::error::DownloadError;
use url::Url;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:2.0b11) Gecko/20100101 Firefox/4.0b11";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-us,en;q=0.5";
const ACCEPT_ENCODING: &str = "gzip, deflate";
const ACCEPT_CHARSET: &str = "ISO-8859-1,utf-8;q=0.7,*;q=0.7";
const KEEP_ALIVE: &str = "115";
const CONNECTION: &str = "keep-alive";

/// Host portion of `url` as it appears in a `Host` header: `host` or `host:port`
/// when the URL names a non-default port.
pub fn host_of(url: &str) -> Result<String, DownloadError> {
    let invalid = || DownloadError::InvalidUrl {
        url: url.to_string(),
    };
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Ordered header list sent with every attempt for `url`.
pub fn forge_browser_headers(url: &str) -> Result<Vec<(&'static str, String)>, DownloadError> {
    Ok(vec![
        ("Host", host_of(url)?),
        ("User-Agent", USER_AGENT.to_string()),
        ("Accept", ACCEPT.to_string()),
        ("Accept-Language", ACCEPT_LANGUAGE.to_string()),
        ("Accept-Encoding", ACCEPT_ENCODING.to_string()),
        ("Accept-Charset", ACCEPT_CHARSET.to_string()),
        ("Keep-Alive", KEEP_ALIVE.to_string()),
        ("Connection", CONNECTION.to_string()),
    ])
}
