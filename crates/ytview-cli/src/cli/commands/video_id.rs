//! `ytview video-id <url>` – print the parsed video ID.

use anyhow::{Context, Result};
use ytview_core::url_model::extract_video_id;

pub fn run_video_id(url: &str) -> Result<()> {
    let id = extract_video_id(url)
        .context("could not parse a valid YouTube video ID from that URL")?;
    println!("{id}");
    Ok(())
}
