//! Progress sinks for the completion poller.
//!
//! The poller calls [`ProgressSink::report`] from inside its loop, so
//! implementations must return quickly. [`ChannelSink`] hands events to a
//! separate consumer and drops them when that consumer falls behind.

use tokio::sync::mpsc;

/// Receives percent-complete updates (0..=100, non-decreasing per session).
pub trait ProgressSink {
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8),
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Fire-and-forget sink backed by a bounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<u8>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its events arrive on.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<u8>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn report(&self, percent: u8) {
        if self.tx.try_send(percent).is_err() {
            tracing::trace!(percent, "progress event dropped");
        }
    }
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn report(&self, _percent: u8) {}
}
