use crate::error::DownloadError;

/// High-level classification of an attempt failure for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or read stalled past the timeout.
    Timeout,
    /// Peer answered with something that is not an HTTP status line (or nothing).
    MalformedResponse,
    /// Any other error (never retried).
    Other,
}

/// Decision returned by the retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and surface this error.
    NoRetry,
    /// Attempt again right away.
    Retry,
}

/// How many times a failed attempt may be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// Up to `n` retries, i.e. `n + 1` attempts in total.
    Limited(u32),
    /// Keep going until success or a non-retryable error.
    Unlimited,
}

impl Default for RetryBudget {
    fn default() -> Self {
        RetryBudget::Limited(0)
    }
}

impl RetryBudget {
    /// Build from the integer form used by callers and config: `-1` = unlimited.
    pub fn from_count(retry: i64) -> Result<Self, DownloadError> {
        if retry == -1 {
            return Ok(RetryBudget::Unlimited);
        }
        u32::try_from(retry)
            .map(RetryBudget::Limited)
            .map_err(|_| DownloadError::InvalidRetry(retry))
    }

    /// Total attempts allowed, None when unlimited.
    pub fn max_attempts(&self) -> Option<u64> {
        match self {
            RetryBudget::Limited(n) => Some(u64::from(*n) + 1),
            RetryBudget::Unlimited => None,
        }
    }

    /// Decide after `attempt` (1-based) failed with `kind`.
    pub fn decide(&self, attempt: u64, kind: ErrorKind) -> RetryDecision {
        if kind == ErrorKind::Other {
            return RetryDecision::NoRetry;
        }
        match self.max_attempts() {
            Some(max) if attempt >= max => RetryDecision::NoRetry,
            _ => RetryDecision::Retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_count_maps_minus_one_to_unlimited() {
        assert_eq!(RetryBudget::from_count(-1).unwrap(), RetryBudget::Unlimited);
        assert_eq!(RetryBudget::from_count(0).unwrap(), RetryBudget::Limited(0));
        assert_eq!(RetryBudget::from_count(7).unwrap(), RetryBudget::Limited(7));
    }

    #[test]
    fn from_count_rejects_other_negatives() {
        assert!(matches!(
            RetryBudget::from_count(-2),
            Err(DownloadError::InvalidRetry(-2))
        ));
    }

    #[test]
    fn no_retry_for_other() {
        let b = RetryBudget::Unlimited;
        assert_eq!(b.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn zero_means_single_attempt() {
        let b = RetryBudget::Limited(0);
        assert_eq!(b.max_attempts(), Some(1));
        assert_eq!(b.decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }

    #[test]
    fn respects_limit() {
        let b = RetryBudget::Limited(2);
        assert_eq!(b.decide(1, ErrorKind::Timeout), RetryDecision::Retry);
        assert_eq!(b.decide(2, ErrorKind::MalformedResponse), RetryDecision::Retry);
        assert_eq!(b.decide(3, ErrorKind::Timeout), RetryDecision::NoRetry);
    }

    #[test]
    fn unlimited_never_runs_out() {
        let b = RetryBudget::Unlimited;
        assert_eq!(b.max_attempts(), None);
        assert_eq!(b.decide(u64::MAX, ErrorKind::Timeout), RetryDecision::Retry);
    }
}
