//! `ytview watch <url>...` – submit, poll, and show each video.

use anyhow::{Context, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use ytview_core::cache::{CachedVideo, ResultCache};
use ytview_core::config::YtviewConfig;
use ytview_core::poller::{CompletionPoller, PollSettings};
use ytview_core::progress::{CurlProgressClient, ProgressSource};
use ytview_core::render;
use ytview_core::submit::JobSubmitter;
use ytview_core::url_model::{canonical_watch_url, extract_video_id};

use super::display::poll_with_progress;
use crate::cli::interrupt::cancel_on_ctrl_c;

pub async fn run_watch(
    cfg: &YtviewConfig,
    cache: &ResultCache,
    urls: &[String],
    api_key: Option<&str>,
    html: Option<&Path>,
) -> Result<()> {
    let api_key = api_key
        .filter(|k| !k.is_empty())
        .context("no API key: pass --api-key or set RAPIDAPI_KEY")?;
    let submitter = JobSubmitter::new(cfg.submit.clone(), api_key);
    let poller = CompletionPoller::new(
        CurlProgressClient::from_config(&cfg.poll),
        PollSettings::from(&cfg.poll),
    );
    let cancel = cancel_on_ctrl_c();

    for url in urls {
        let video = watch_one(&submitter, &poller, cache, url, &cancel)
            .await
            .with_context(|| url.clone())?;
        print!("{}", render::summary(&video));
        if let Some(path) = html {
            std::fs::write(path, render::html_page(&video))
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("Player page: {}", path.display());
        }
    }
    Ok(())
}

async fn watch_one<P: ProgressSource>(
    submitter: &JobSubmitter,
    poller: &CompletionPoller<P>,
    cache: &ResultCache,
    url: &str,
    cancel: &CancellationToken,
) -> Result<CachedVideo> {
    let video_id = extract_video_id(url)
        .context("could not parse a valid YouTube video ID from that URL")?;
    if let Some(video) = cache.get(&video_id) {
        tracing::debug!(%video_id, "already converted, using cached result");
        return Ok(video);
    }

    let watch_url = canonical_watch_url(&video_id);
    let job = submitter.submit_cancellable(&watch_url, cancel).await?;
    tracing::info!(%video_id, progress_url = %job.progress_url, "job started");
    if !job.title.is_empty() {
        println!("{}", job.title);
    }

    let artifact_url = poll_with_progress(poller, &job.progress_url, cancel)
        .await
        .context("error while waiting for video")?;

    let video = CachedVideo {
        artifact_url,
        title: job.title,
        thumbnail: job.thumbnail,
    };
    cache.insert(&video_id, video.clone());
    Ok(video)
}
