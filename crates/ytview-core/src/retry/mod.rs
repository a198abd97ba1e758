//! Retry and backoff policy.
//!
//! Classifies failed progress requests (timeouts, connection failures,
//! overload statuses) and decides how long the poller waits before trying
//! again, or whether it gives up.

mod classify;
mod error;
mod policy;

pub use classify::{
    classify_curl_error, classify_http_status, ErrorKind, DEFAULT_TRANSIENT_STATUSES,
};
pub use error::{FailureClass, PollError};
pub use policy::{BackoffPolicy, RetryDecision};
