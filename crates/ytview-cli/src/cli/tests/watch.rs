//! Tests for the watch subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_watch() {
    match parse(&["ytview", "watch", "https://youtu.be/dQw4w9WgXcQ"]) {
        CliCommand::Watch { urls, html, .. } => {
            assert_eq!(urls, vec!["https://youtu.be/dQw4w9WgXcQ".to_string()]);
            assert!(html.is_none());
        }
        _ => panic!("expected Watch"),
    }
}

#[test]
fn cli_parse_watch_many_with_key_and_html() {
    match parse(&[
        "ytview",
        "watch",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube.com/watch?v=9bZkp7q19f0",
        "--api-key",
        "k123",
        "--html",
        "/tmp/player.html",
    ]) {
        CliCommand::Watch {
            urls,
            api_key,
            html,
        } => {
            assert_eq!(urls.len(), 2);
            assert_eq!(api_key.as_deref(), Some("k123"));
            assert_eq!(
                html.as_deref(),
                Some(std::path::Path::new("/tmp/player.html"))
            );
        }
        _ => panic!("expected Watch with options"),
    }
}

#[test]
fn cli_watch_requires_url() {
    assert!(Cli::try_parse_from(["ytview", "watch"]).is_err());
}
