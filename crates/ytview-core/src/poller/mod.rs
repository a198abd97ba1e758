//! Completion poller: drives a remote job to completion.
//!
//! The loop asks a [`ProgressSource`] for the job's state, reports progress,
//! and sleeps between requests. Transient failures feed the
//! [`BackoffPolicy`]; fatal ones end the run. A monotonic wall-clock guard at
//! the top of every iteration bounds the total wait, and every suspension
//! point (request, backoff sleep, interval sleep) is raced against the
//! caller's cancellation token.

mod session;

pub use session::PollSession;

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::PollConfig;
use crate::progress::{PollOutcome, ProgressSource};
use crate::report::ProgressSink;
use crate::retry::{BackoffPolicy, PollError, RetryDecision};

/// Timing parameters for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait between polls while the job is progressing.
    pub poll_interval: Duration,
    /// Total wait ceiling for one run.
    pub max_total: Duration,
    pub backoff: BackoffPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from(&PollConfig::default())
    }
}

impl From<&PollConfig> for PollSettings {
    fn from(cfg: &PollConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(cfg.poll_interval_secs),
            max_total: Duration::from_secs(cfg.max_total_secs),
            backoff: BackoffPolicy {
                max_consecutive_failures: cfg.max_consecutive_failures,
                base_delay: Duration::from_secs(cfg.backoff_base_secs),
                step: Duration::from_secs(cfg.backoff_step_secs),
                max_delay: Duration::from_secs(cfg.backoff_cap_secs),
            },
        }
    }
}

/// Polls one job at a time until it completes or fails.
///
/// Holds no per-job state; each [`run`](Self::run) owns a fresh
/// [`PollSession`], so one poller can serve any number of sequential runs.
#[derive(Debug, Clone)]
pub struct CompletionPoller<P> {
    source: P,
    settings: PollSettings,
}

impl<P: ProgressSource> CompletionPoller<P> {
    pub fn new(source: P, settings: PollSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Polls `progress_url` until the artifact is ready and returns its URL.
    ///
    /// `sink` receives non-decreasing percentages, ending with 100 on success.
    pub async fn run<S: ProgressSink + ?Sized>(
        &self,
        progress_url: &str,
        sink: &S,
        cancel: &CancellationToken,
    ) -> Result<String, PollError> {
        let mut session = PollSession::new(progress_url);
        tracing::debug!(url = progress_url, "poll session started");

        loop {
            let elapsed = session.elapsed();
            if elapsed > self.settings.max_total {
                tracing::warn!(
                    url = progress_url,
                    elapsed_secs = elapsed.as_secs(),
                    "giving up: wait ceiling reached"
                );
                return Err(PollError::TimeoutExceeded {
                    elapsed_secs: elapsed.as_secs(),
                    limit_secs: self.settings.max_total.as_secs(),
                });
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                outcome = self.source.fetch(session.progress_url(), cancel) => outcome,
            };

            match outcome {
                PollOutcome::Complete(artifact_url) => {
                    session.record_success();
                    session.report(sink, 100);
                    tracing::info!(
                        url = progress_url,
                        elapsed_secs = session.elapsed().as_secs(),
                        "job complete"
                    );
                    return Ok(artifact_url);
                }
                PollOutcome::FatalFailure(reason) => {
                    tracing::warn!(url = progress_url, %reason, "fatal progress failure");
                    return Err(PollError::FatalService(reason));
                }
                PollOutcome::Continue(snapshot) => {
                    session.record_success();
                    session.report(sink, snapshot.percent());
                    tracing::debug!(
                        raw = snapshot.raw_progress,
                        percent = session.last_reported_percent(),
                        "job in progress"
                    );
                    self.sleep(self.settings.poll_interval, cancel).await?;
                }
                PollOutcome::TransientFailure { class, reason } => {
                    let failures = session.record_failure();
                    match self.settings.backoff.decide(failures) {
                        RetryDecision::NoRetry => {
                            tracing::warn!(url = progress_url, failures, %class, "retry budget exhausted");
                            return Err(PollError::RetryBudgetExhausted {
                                class,
                                failures,
                                last_reason: reason,
                            });
                        }
                        RetryDecision::RetryAfter(delay) => {
                            tracing::warn!(
                                failures,
                                delay_secs = delay.as_secs_f64(),
                                %reason,
                                "transient progress failure, backing off"
                            );
                            self.sleep(delay, cancel).await?;
                        }
                    }
                }
            }
        }
    }

    async fn sleep(&self, delay: Duration, cancel: &CancellationToken) -> Result<(), PollError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PollError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
