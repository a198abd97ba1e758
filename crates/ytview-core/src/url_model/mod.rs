//! URL helpers: video ID extraction and artifact URL cleanup.

mod sanitize;
mod video_id;

pub use sanitize::sanitize_artifact_url;
pub use video_id::{canonical_watch_url, extract_video_id};
