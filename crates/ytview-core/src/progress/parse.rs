//! Map an HTTP status and JSON body into a PollOutcome.

use serde_json::Value;

use super::{PollOutcome, ProgressSnapshot};
use crate::retry::classify_http_status;

/// Normalizes one completed HTTP exchange.
pub(crate) fn outcome_from_response(status: u32, body: &[u8], transient: &[u16]) -> PollOutcome {
    if !(200..300).contains(&status) {
        let reason = format!("HTTP {status}");
        return match classify_http_status(status, transient).failure_class() {
            Some(class) => PollOutcome::TransientFailure { class, reason },
            None => PollOutcome::FatalFailure(reason),
        };
    }
    match parse_snapshot(body) {
        Ok(snapshot) => snapshot.into_outcome(),
        Err(reason) => PollOutcome::FatalFailure(reason),
    }
}

/// Parses `{"progress": <int>, "download_url": <string>}`.
///
/// `progress` defaults to 0 when absent or null; integers, floats (truncated)
/// and numeric strings are accepted.
pub(crate) fn parse_snapshot(body: &[u8]) -> Result<ProgressSnapshot, String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| format!("malformed progress response: {e}"))?;
    let obj = value
        .as_object()
        .ok_or_else(|| "malformed progress response: not a JSON object".to_string())?;

    let raw_progress = match obj.get("progress") {
        None | Some(Value::Null) => 0,
        Some(v) => progress_value(v)
            .ok_or_else(|| format!("malformed progress response: progress = {v}"))?,
    };
    let download_url = obj
        .get("download_url")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ProgressSnapshot::new(raw_progress, download_url))
}

fn progress_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
