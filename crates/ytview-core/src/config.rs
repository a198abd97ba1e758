use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::retry::DEFAULT_TRANSIENT_STATUSES;

/// Completion poller parameters (`[poll]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Per-request timeout for one progress GET, in seconds.
    pub request_timeout_secs: u64,
    /// Consecutive transient failures tolerated before giving up.
    pub max_consecutive_failures: u32,
    /// Backoff delay before the per-failure step, in seconds.
    pub backoff_base_secs: u64,
    /// Backoff increment per consecutive failure, in seconds.
    pub backoff_step_secs: u64,
    /// Maximum backoff delay, in seconds.
    pub backoff_cap_secs: u64,
    /// Wait between polls while the job is progressing, in seconds.
    pub poll_interval_secs: u64,
    /// Total wait ceiling for one job, in seconds.
    pub max_total_secs: u64,
    /// HTTP statuses treated as transient overload.
    pub transient_statuses: Vec<u16>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            max_consecutive_failures: 20,
            backoff_base_secs: 2,
            backoff_step_secs: 1,
            backoff_cap_secs: 10,
            poll_interval_secs: 2,
            max_total_secs: 15 * 60,
            transient_statuses: DEFAULT_TRANSIENT_STATUSES.to_vec(),
        }
    }
}

/// Job submission parameters (`[submit]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// RapidAPI host of the conversion service.
    pub api_host: String,
    /// Requested video format (vertical resolution).
    pub format: String,
    /// Requested audio bitrate in kbps.
    pub audio_quality: String,
    /// Preferred audio language.
    pub audio_language: String,
    /// Timeout for the submission request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            api_host: "youtube-info-download-api.p.rapidapi.com".to_string(),
            format: "1080".to_string(),
            audio_quality: "128".to_string(),
            audio_language: "en".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/ytview/config.toml`.
///
/// The API credential is deliberately not part of this file; it comes from
/// the `RAPIDAPI_KEY` environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtviewConfig {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytview")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<YtviewConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there first if it is missing.
pub fn load_or_init_at(path: &Path) -> Result<YtviewConfig> {
    if !path.exists() {
        let default_cfg = YtviewConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: YtviewConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
