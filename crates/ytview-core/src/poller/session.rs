//! Per-run polling state.

use std::time::Duration;
use tokio::time::Instant;

use crate::report::ProgressSink;

/// State of one in-flight `run()`. Never shared between runs.
#[derive(Debug)]
pub struct PollSession {
    progress_url: String,
    started_at: Instant,
    consecutive_failures: u32,
    last_reported_percent: u8,
}

impl PollSession {
    pub fn new(progress_url: &str) -> Self {
        Self {
            progress_url: progress_url.to_string(),
            started_at: Instant::now(),
            consecutive_failures: 0,
            last_reported_percent: 0,
        }
    }

    pub fn progress_url(&self) -> &str {
        &self.progress_url
    }

    /// Monotonic time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn last_reported_percent(&self) -> u8 {
        self.last_reported_percent
    }

    /// A response was parsed; the failure streak is over.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Returns the failure count including this one.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    /// Reports `percent` to `sink`, never going below a value already reported.
    pub fn report<S: ProgressSink + ?Sized>(&mut self, sink: &S, percent: u8) {
        let percent = percent.min(100).max(self.last_reported_percent);
        self.last_reported_percent = percent;
        sink.report(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn success_resets_failures() {
        let mut s = PollSession::new("https://p/1");
        assert_eq!(s.record_failure(), 1);
        assert_eq!(s.record_failure(), 2);
        s.record_success();
        assert_eq!(s.consecutive_failures(), 0);
        assert_eq!(s.record_failure(), 1);
    }

    #[test]
    fn reported_percent_never_decreases() {
        let seen = RefCell::new(Vec::new());
        let sink = |p: u8| seen.borrow_mut().push(p);
        let mut s = PollSession::new("https://p/1");
        s.report(&sink, 40);
        s.report(&sink, 30);
        s.report(&sink, 70);
        s.report(&sink, 250);
        assert_eq!(*seen.borrow(), vec![40, 40, 70, 100]);
        assert_eq!(s.last_reported_percent(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_uses_monotonic_clock() {
        let s = PollSession::new("https://p/1");
        tokio::time::advance(Duration::from_secs(90)).await;
        assert!(s.elapsed() >= Duration::from_secs(90));
    }
}
