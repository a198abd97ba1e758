//! Terminal polling errors.

use std::fmt;

/// Which kind of transient failure the poller last saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Connection failure or request timeout.
    Network,
    /// The service answered with an overload/gateway status.
    Server,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Network => write!(f, "network error"),
            FailureClass::Server => write!(f, "service unavailable"),
        }
    }
}

/// Why a poll session ended without an artifact URL.
///
/// Every variant is recoverable by starting a fresh session.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// Non-retryable answer from the service (bad status, malformed body,
    /// or completion without a download link).
    #[error("service error: {0}")]
    FatalService(String),
    /// Total wait exceeded the configured ceiling.
    #[error("timed out after {elapsed_secs}s waiting for the video (limit {limit_secs}s)")]
    TimeoutExceeded { elapsed_secs: u64, limit_secs: u64 },
    /// Too many transient failures in a row.
    #[error("{class} after {failures} consecutive failures (last: {last_reason})")]
    RetryBudgetExhausted {
        class: FailureClass,
        failures: u32,
        last_reason: String,
    },
    /// The caller's cancellation token fired.
    #[error("polling cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let e = PollError::RetryBudgetExhausted {
            class: FailureClass::Server,
            failures: 21,
            last_reason: "HTTP 503".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "service unavailable after 21 consecutive failures (last: HTTP 503)"
        );
        let e = PollError::RetryBudgetExhausted {
            class: FailureClass::Network,
            failures: 3,
            last_reason: "connection refused".to_string(),
        };
        assert!(e.to_string().starts_with("network error"));
        let e = PollError::TimeoutExceeded {
            elapsed_secs: 902,
            limit_secs: 900,
        };
        assert!(e.to_string().contains("timed out"));
    }
}
