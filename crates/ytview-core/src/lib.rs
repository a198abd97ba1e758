pub mod config;
pub mod logging;

pub mod cache;
pub mod poller;
pub mod progress;
pub mod render;
pub mod report;
pub mod retry;
pub mod submit;
pub mod url_model;
