//! CLI for the YTView video fetcher.

mod commands;
mod interrupt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ytview_core::cache::ResultCache;
use ytview_core::config;

use commands::{run_poll, run_video_id, run_watch};

/// Top-level CLI for YTView.
#[derive(Debug, Parser)]
#[command(name = "ytview")]
#[command(about = "YTView: paste a YouTube link, get a playable MP4", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert one or more videos and print their download links.
    Watch {
        /// YouTube watch, short, or embed URLs.
        #[arg(required = true)]
        urls: Vec<String>,

        /// RapidAPI key for the conversion service.
        #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Also write an HTML player page for the last video to this path.
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },

    /// Poll an already started job until its video is ready.
    Poll {
        /// Progress URL returned when the job was submitted.
        progress_url: String,
    },

    /// Print the video ID parsed from a URL.
    VideoId {
        /// YouTube URL.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Watch {
                urls,
                api_key,
                html,
            } => {
                let cache = ResultCache::new();
                run_watch(&cfg, &cache, &urls, api_key.as_deref(), html.as_deref()).await?
            }
            CliCommand::Poll { progress_url } => run_poll(&cfg, &progress_url).await?,
            CliCommand::VideoId { url } => run_video_id(&url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
