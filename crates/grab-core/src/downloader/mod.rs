//! Single-URL downloader.
//!
//! Builds a browser-like request, retries it on timeouts and malformed replies
//! within the caller's budget, then either returns the (gunzipped) body or
//! stages it in the working directory, gunzips it there, moves it onto the
//! destination and copies the remote `Last-Modified` onto the file.

use crate::config::GrabConfig;
use crate::error::DownloadError;
use crate::request::Request;
use crate::retry::{run_with_retry, RetryBudget, TransportError};
use crate::storage::{self, StagingFile};
use crate::transport::{CurlTransport, ResponseHead, Transport};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Destination file. None = keep the content in memory and return it.
    pub path: Option<PathBuf>,
    /// Replace a non-empty file at `path` instead of failing.
    pub overwrite_existing: bool,
    /// Connect / stall timeout per attempt. None = the configured default.
    pub timeout: Option<Duration>,
    pub retry: RetryBudget,
}

impl DownloadOptions {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite_existing = yes;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry(mut self, retry: RetryBudget) -> Self {
        self.retry = retry;
        self
    }
}

/// Result of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// In-memory mode: the decoded body.
    Content(Vec<u8>),
    /// File mode: the body now lives at this path.
    Saved(PathBuf),
}

impl Fetched {
    pub fn into_content(self) -> Option<Vec<u8>> {
        match self {
            Fetched::Content(c) => Some(c),
            Fetched::Saved(_) => None,
        }
    }

    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            Fetched::Saved(p) => Some(p),
            Fetched::Content(_) => None,
        }
    }
}

pub struct Downloader<T = CurlTransport> {
    transport: T,
    config: GrabConfig,
}

impl Downloader<CurlTransport> {
    pub fn new(config: GrabConfig) -> Self {
        Self::with_transport(CurlTransport::new(), config)
    }
}

impl<T: Transport> Downloader<T> {
    pub fn with_transport(transport: T, config: GrabConfig) -> Self {
        Self { transport, config }
    }

    /// Fetch `url` into memory or onto `opts.path`.
    ///
    /// In file mode the destination is untouched until the full body has been
    /// received (and gunzipped); then it is replaced in a single rename.
    pub fn download(&mut self, url: &str, opts: &DownloadOptions) -> Result<Fetched, DownloadError> {
        if let Some(path) = &opts.path {
            check_destination(path, opts.overwrite_existing)?;
        }
        let timeout = opts.timeout.or_else(|| self.config.default_timeout());
        let request = Request::new(url, timeout)?;

        match &opts.path {
            None => self.fetch_to_memory(&request, &opts.retry).map(Fetched::Content),
            Some(path) => {
                self.fetch_to_file(&request, &opts.retry, path)?;
                Ok(Fetched::Saved(path.clone()))
            }
        }
    }

    fn fetch_to_memory(&mut self, request: &Request, retry: &RetryBudget) -> Result<Vec<u8>, DownloadError> {
        let transport = &mut self.transport;
        let mut body = Vec::new();
        let head = run_with_retry(retry, |n| {
            body.clear();
            attempt(&mut *transport, request, n, &mut body)
        })?;

        let content = if head.is_gzipped() {
            storage::gunzip_bytes(&body)
                .map_err(|source| DownloadError::Decompress { path: None, source })?
        } else {
            body
        };
        tracing::info!(
            url = %request.url,
            bytes = content.len(),
            content_length = ?head.content_length,
            "downloaded to memory"
        );
        Ok(content)
    }

    fn fetch_to_file(&mut self, request: &Request, retry: &RetryBudget, dest: &Path) -> Result<(), DownloadError> {
        let Downloader { transport, config } = self;
        let work_dir = config.work_dir();

        let mut staging = StagingFile::create_in(work_dir)?;
        let head = run_with_retry(retry, |n| {
            staging.rewind().map_err(TransportError::Sink)?;
            attempt(&mut *transport, request, n, staging.writer())
        })?;
        let staged = staging.close()?;

        if head.is_gzipped() {
            storage::gunzip_in_place(&staged, work_dir)?;
        }
        storage::ensure_parent_dir(dest)?;
        storage::move_into_place(staged, dest)?;
        let stamped = storage::apply_last_modified(dest, head.last_modified.as_deref())?;

        tracing::info!(
            url = %request.url,
            path = %dest.display(),
            gzipped = head.is_gzipped(),
            content_length = ?head.content_length,
            stamped,
            "downloaded to file"
        );
        Ok(())
    }
}

/// Fail early if `path` already holds data and overwriting was not requested.
fn check_destination(path: &Path, overwrite_existing: bool) -> Result<(), DownloadError> {
    if overwrite_existing {
        return Ok(());
    }
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Err(DownloadError::Exists {
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// One exchange; a non-2xx status counts as a (non-retryable) failure.
fn attempt<T: Transport + ?Sized>(
    transport: &mut T,
    request: &Request,
    n: u64,
    body: &mut dyn Write,
) -> Result<ResponseHead, TransportError> {
    tracing::debug!(attempt = n, url = %request.url, "connecting");
    let head = transport.fetch(request, body)?;
    if !head.is_success() {
        return Err(TransportError::Http(head.status));
    }
    Ok(head)
}

/// Download with the library defaults and a curl transport.
///
/// `retry` is the number of extra attempts after a timeout or malformed reply;
/// `-1` retries until something else happens.
pub fn download(
    url: &str,
    path: Option<&Path>,
    overwrite_existing: bool,
    timeout: Option<Duration>,
    retry: i64,
) -> Result<Fetched, DownloadError> {
    let opts = DownloadOptions {
        path: path.map(Path::to_path_buf),
        overwrite_existing,
        timeout,
        retry: RetryBudget::from_count(retry)?,
    };
    Downloader::new(GrabConfig::default()).download(url, &opts)
}
