//! Video ID extraction from watch, short, and embed URLs.

/// Length of a video ID.
const ID_LEN: usize = 11;

/// Prefixes that are directly followed by the video ID.
const ID_MARKERS: [&str; 4] = ["v=", "/v/", "youtu.be/", "/embed/"];

fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Returns the first video ID found in `url`.
///
/// An ID is 11 characters from `[A-Za-z0-9_-]` right after one of `v=`,
/// `/v/`, `youtu.be/` or `/embed/`. The leftmost match wins; trailing
/// characters after the 11th are ignored.
pub fn extract_video_id(url: &str) -> Option<String> {
    let bytes = url.as_bytes();
    for start in 0..bytes.len() {
        for marker in ID_MARKERS {
            if !bytes[start..].starts_with(marker.as_bytes()) {
                continue;
            }
            let id_start = start + marker.len();
            let id = match bytes.get(id_start..id_start + ID_LEN) {
                Some(id) => id,
                None => continue,
            };
            if id.iter().all(|b| is_id_byte(*b)) {
                return Some(url[id_start..id_start + ID_LEN].to_string());
            }
        }
    }
    None
}

/// Normalized watch URL sent to the conversion service.
pub fn canonical_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
