//! Job submission: ask the conversion service to start processing a video.
//!
//! One GET against the RapidAPI download endpoint. The response names the
//! video and carries the progress URL the completion poller follows.

mod parse;

pub use parse::parse_submit_response;

use anyhow::{Context, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::SubmitConfig;

/// What the service told us about a freshly started job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    /// Video title; empty if the service did not send one.
    pub title: String,
    /// Thumbnail image URL; empty if absent.
    pub thumbnail: String,
    /// Endpoint to poll until the artifact is ready.
    pub progress_url: String,
}

/// Client for the job-submission endpoint. Holds the API credential.
#[derive(Clone)]
pub struct JobSubmitter {
    cfg: SubmitConfig,
    api_key: String,
}

impl std::fmt::Debug for JobSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSubmitter")
            .field("cfg", &self.cfg)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl JobSubmitter {
    pub fn new(cfg: SubmitConfig, api_key: impl Into<String>) -> Self {
        Self {
            cfg,
            api_key: api_key.into(),
        }
    }

    /// Full request URL for `watch_url`, query parameters included.
    pub fn request_url(&self, watch_url: &str) -> Result<String> {
        let endpoint = format!("https://{}/ajax/download.php", self.cfg.api_host);
        let url = url::Url::parse_with_params(
            &endpoint,
            &[
                ("format", self.cfg.format.as_str()),
                ("add_info", "0"),
                ("url", watch_url),
                ("audio_quality", self.cfg.audio_quality.as_str()),
                ("allow_extended_duration", "false"),
                ("no_merge", "false"),
                ("audio_language", self.cfg.audio_language.as_str()),
            ],
        )
        .with_context(|| format!("invalid API host {:?}", self.cfg.api_host))?;
        Ok(url.into())
    }

    /// Starts a job for `watch_url` and returns its progress URL.
    ///
    /// Runs in the current thread; use [`submit_cancellable`](Self::submit_cancellable)
    /// from async code.
    pub fn submit(&self, watch_url: &str) -> Result<SubmittedJob> {
        self.submit_until(watch_url, &CancellationToken::new())
    }

    /// Async submission on the blocking pool that returns as soon as `cancel` fires.
    pub async fn submit_cancellable(
        &self,
        watch_url: &str,
        cancel: &CancellationToken,
    ) -> Result<SubmittedJob> {
        if cancel.is_cancelled() {
            anyhow::bail!("submission cancelled");
        }
        let submitter = self.clone();
        let watch_url = watch_url.to_string();
        let token = cancel.clone();
        let task =
            tokio::task::spawn_blocking(move || submitter.submit_until(&watch_url, &token));
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            joined = task => Some(joined),
        };
        match joined {
            Some(joined) => joined.context("submission task failed")?,
            None => anyhow::bail!("submission cancelled"),
        }
    }

    fn submit_until(&self, watch_url: &str, cancel: &CancellationToken) -> Result<SubmittedJob> {
        let request_url = self.request_url(watch_url)?;
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request_url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(self.cfg.request_timeout_secs))?;
        easy.progress(true)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("x-rapidapi-host: {}", self.cfg.api_host))?;
        list.append(&format!("x-rapidapi-key: {}", self.api_key))?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform().context("API request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("API request failed: HTTP {}", code);
        }
        tracing::debug!(watch_url, bytes = body.len(), "job submitted");

        parse_submit_response(&body)
    }
}
