pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod request;
pub mod retry;
pub mod storage;
pub mod transport;

pub use downloader::{download, DownloadOptions, Downloader, Fetched};
pub use error::DownloadError;
