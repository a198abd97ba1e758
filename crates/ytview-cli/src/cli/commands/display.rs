//! Live progress line while a job is polled.

use std::io::Write;

use tokio_util::sync::CancellationToken;
use ytview_core::poller::CompletionPoller;
use ytview_core::progress::ProgressSource;
use ytview_core::render;
use ytview_core::report::ChannelSink;
use ytview_core::retry::PollError;

/// Runs `poller` and redraws the progress line on stdout from a separate task,
/// so a slow terminal never stalls the poll loop.
pub(super) async fn poll_with_progress<P: ProgressSource>(
    poller: &CompletionPoller<P>,
    progress_url: &str,
    cancel: &CancellationToken,
) -> Result<String, PollError> {
    let (sink, mut progress_rx) = ChannelSink::channel(16);
    let printer = tokio::spawn(async move {
        let mut drew = false;
        while let Some(percent) = progress_rx.recv().await {
            print!("\r{}", render::progress_line(percent));
            let _ = std::io::stdout().flush();
            drew = true;
        }
        if drew {
            println!();
        }
    });

    let result = poller.run(progress_url, &sink, cancel).await;
    drop(sink);
    let _ = printer.await;
    result
}
