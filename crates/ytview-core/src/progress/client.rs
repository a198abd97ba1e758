//! libcurl-backed progress client.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{outcome_from_response, PollOutcome, ProgressSource};
use crate::config::PollConfig;
use crate::retry::classify_curl_error;

/// Upper bound on the connect phase; the overall request timeout may be shorter.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Largest progress response body accepted; progress answers are tiny JSON objects.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Performs progress GETs with curl on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct CurlProgressClient {
    request_timeout: Duration,
    transient_statuses: Arc<[u16]>,
}

impl CurlProgressClient {
    pub fn new(request_timeout: Duration, transient_statuses: &[u16]) -> Self {
        Self {
            request_timeout,
            transient_statuses: Arc::from(transient_statuses),
        }
    }

    pub fn from_config(cfg: &PollConfig) -> Self {
        Self::new(
            Duration::from_secs(cfg.request_timeout_secs),
            &cfg.transient_statuses,
        )
    }
}

impl ProgressSource for CurlProgressClient {
    async fn fetch(&self, progress_url: &str, cancel: &CancellationToken) -> PollOutcome {
        let url = progress_url.to_string();
        let timeout = self.request_timeout;
        let token = cancel.clone();
        let joined = tokio::task::spawn_blocking(move || get(&url, timeout, &token)).await;

        match joined {
            Ok(Ok((status, body))) => {
                outcome_from_response(status, &body, &self.transient_statuses)
            }
            Ok(Err(e)) if e.is_write_error() => PollOutcome::FatalFailure(format!(
                "progress response larger than {MAX_BODY_BYTES} bytes"
            )),
            Ok(Err(e)) => match classify_curl_error(&e).failure_class() {
                Some(class) => PollOutcome::TransientFailure {
                    class,
                    reason: e.to_string(),
                },
                None => PollOutcome::FatalFailure(format!("progress request failed: {e}")),
            },
            Err(e) => PollOutcome::FatalFailure(format!("progress request task failed: {e}")),
        }
    }
}

/// One blocking GET. Returns the status code and body.
///
/// The transfer is aborted from curl's progress callback once `cancel` fires,
/// and by a short write once the body would exceed [`MAX_BODY_BYTES`].
fn get(
    url: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<(u32, Vec<u8>), curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(timeout.min(CONNECT_TIMEOUT))?;
    easy.timeout(timeout)?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > MAX_BODY_BYTES {
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    tracing::trace!(url, code, bytes = body.len(), "progress response");
    Ok((code, body))
}
