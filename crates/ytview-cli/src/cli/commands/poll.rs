//! `ytview poll <progress_url>` – wait for an already submitted job.

use anyhow::{Context, Result};
use ytview_core::config::YtviewConfig;
use ytview_core::poller::{CompletionPoller, PollSettings};
use ytview_core::progress::CurlProgressClient;

use super::display::poll_with_progress;
use crate::cli::interrupt::cancel_on_ctrl_c;

pub async fn run_poll(cfg: &YtviewConfig, progress_url: &str) -> Result<()> {
    let poller = CompletionPoller::new(
        CurlProgressClient::from_config(&cfg.poll),
        PollSettings::from(&cfg.poll),
    );
    let cancel = cancel_on_ctrl_c();
    let artifact_url = poll_with_progress(&poller, progress_url, &cancel)
        .await
        .context("error while waiting for video")?;
    println!("Download MP4: {artifact_url}");
    Ok(())
}
