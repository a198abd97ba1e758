//! Parse the job-submission response body.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::SubmittedJob;

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    info: Option<SubmitInfo>,
    #[serde(default)]
    progress_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitInfo {
    #[serde(default)]
    image: Option<String>,
}

/// Parses the JSON body returned when a job is started.
///
/// Fails when `success` is not true or no progress URL was returned.
pub fn parse_submit_response(body: &[u8]) -> Result<SubmittedJob> {
    let resp: SubmitResponse =
        serde_json::from_slice(body).context("API returned a malformed response")?;
    if !resp.success {
        anyhow::bail!("API error: {}", String::from_utf8_lossy(body).trim());
    }
    let progress_url = resp
        .progress_url
        .filter(|u| !u.is_empty())
        .context("no progress URL returned by the API")?;

    Ok(SubmittedJob {
        title: resp.title.unwrap_or_default(),
        thumbnail: resp.info.and_then(|i| i.image).unwrap_or_default(),
        progress_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response() {
        let body = br#"{
            "success": true,
            "id": "abc",
            "title": "Never Gonna Give You Up",
            "info": {"image": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq.jpg", "title": "x"},
            "progress_url": "https://p.example.com/api/progress?id=abc"
        }"#;
        let job = parse_submit_response(body).unwrap();
        assert_eq!(job.title, "Never Gonna Give You Up");
        assert_eq!(job.thumbnail, "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq.jpg");
        assert_eq!(job.progress_url, "https://p.example.com/api/progress?id=abc");
    }

    #[test]
    fn title_and_thumbnail_optional() {
        let body = br#"{"success": true, "progress_url": "https://p/1"}"#;
        let job = parse_submit_response(body).unwrap();
        assert!(job.title.is_empty());
        assert!(job.thumbnail.is_empty());
    }

    #[test]
    fn unsuccessful_response() {
        let body = br#"{"success": false, "message": "quota exceeded"}"#;
        let err = parse_submit_response(body).unwrap_err();
        assert!(err.to_string().starts_with("API error"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn missing_progress_url() {
        for body in [
            &br#"{"success": true}"#[..],
            &br#"{"success": true, "progress_url": ""}"#[..],
        ] {
            let err = parse_submit_response(body).unwrap_err();
            assert!(err.to_string().contains("no progress URL"));
        }
    }

    #[test]
    fn malformed_body() {
        assert!(parse_submit_response(b"<html>").is_err());
    }
}
