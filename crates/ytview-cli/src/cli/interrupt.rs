//! Ctrl-C handling: turn SIGINT into a cancellation token.

use tokio_util::sync::CancellationToken;

/// Returns a token that is cancelled when the user presses Ctrl-C.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling");
            trigger.cancel();
        }
    });
    token
}
