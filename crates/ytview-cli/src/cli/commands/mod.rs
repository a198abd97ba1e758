//! CLI command handlers. Each command is in its own file.

mod display;
mod poll;
mod video_id;
mod watch;

pub use poll::run_poll;
pub use video_id::run_video_id;
pub use watch::run_watch;
