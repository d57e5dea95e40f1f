//! Retry policy.
//!
//! Error classification (timeout, malformed reply, anything else) and the
//! attempt budget, so the downloader loop only decides "again or give up".
//! There is no backoff: the per-attempt timeout paces retries.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error};
pub use error::TransportError;
pub use policy::{ErrorKind, RetryBudget, RetryDecision};
pub use run::run_with_retry;
