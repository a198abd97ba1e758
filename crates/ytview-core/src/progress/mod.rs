//! Progress endpoint client.
//!
//! One GET against the job's progress URL, normalized into a [`PollOutcome`].
//! Retrying is the poller's job; nothing here loops.

mod client;
mod parse;

pub use client::CurlProgressClient;
pub(crate) use parse::outcome_from_response;

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::retry::FailureClass;

/// Raw progress value the service reports once the artifact is ready.
pub const COMPLETE_PROGRESS: i64 = 1000;

/// Raw progress units per displayed percent (0..=1000 maps to 0..=100).
pub const PROGRESS_UNITS_PER_PERCENT: i64 = 10;

/// One parsed progress response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Service units, expected 0..=1000.
    pub raw_progress: i64,
    /// Only kept once `raw_progress` reaches [`COMPLETE_PROGRESS`].
    pub download_url: Option<String>,
}

impl ProgressSnapshot {
    pub fn new(raw_progress: i64, download_url: Option<String>) -> Self {
        let download_url =
            download_url.filter(|u| !u.is_empty() && raw_progress >= COMPLETE_PROGRESS);
        Self {
            raw_progress,
            download_url,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.raw_progress >= COMPLETE_PROGRESS
    }

    /// Displayed percent: floor(raw / 10) clamped to 0..=100.
    pub fn percent(&self) -> u8 {
        self.raw_progress
            .div_euclid(PROGRESS_UNITS_PER_PERCENT)
            .clamp(0, 100) as u8
    }

    /// Maps a parsed response to the outcome the poller acts on.
    pub fn into_outcome(self) -> PollOutcome {
        if !self.is_complete() {
            return PollOutcome::Continue(self);
        }
        match self.download_url {
            Some(url) => PollOutcome::Complete(crate::url_model::sanitize_artifact_url(&url)),
            None => PollOutcome::FatalFailure("finished but no artifact URL".to_string()),
        }
    }
}

/// Result of a single progress request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Parsed response, job still running.
    Continue(ProgressSnapshot),
    /// Retryable failure.
    TransientFailure { class: FailureClass, reason: String },
    /// Non-retryable failure.
    FatalFailure(String),
    /// Job finished; carries the sanitized artifact URL.
    Complete(String),
}

/// Anything that can answer "how far along is this job?" once.
///
/// [`CurlProgressClient`] is the HTTP implementation; tests script their own.
pub trait ProgressSource {
    /// Perform one progress request. Should return promptly once `cancel` fires.
    fn fetch(
        &self,
        progress_url: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = PollOutcome> + Send;
}
