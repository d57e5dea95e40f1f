//! Retry loop: run a closure until success or the budget says stop.

use super::classify;
use super::error::TransportError;
use super::policy::{RetryBudget, RetryDecision};

/// Runs `f` until it succeeds or the budget says to stop. `f` receives the
/// 1-based attempt number. Retries follow immediately; the caller's timeout
/// is what paces them.
pub fn run_with_retry<T, F>(budget: &RetryBudget, mut f: F) -> Result<T, TransportError>
where
    F: FnMut(u64) -> Result<T, TransportError>,
{
    let mut attempt = 1u64;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match budget.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        tracing::debug!(attempt, ?kind, "giving up: {}", e);
                        return Err(e);
                    }
                    RetryDecision::Retry => {
                        tracing::warn!(attempt, ?kind, "attempt failed, retrying: {}", e);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
