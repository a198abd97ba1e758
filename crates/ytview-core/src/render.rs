//! Presentation: terminal progress line, result summary, and a minimal HTML page.

use crate::cache::CachedVideo;

/// Width of the terminal progress bar in cells.
const BAR_WIDTH: usize = 30;

/// One-line progress bar, e.g. `[#########.....................]  30%  Processing video… 30%`.
pub fn progress_line(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = BAR_WIDTH * usize::from(percent) / 100;
    let text = if percent >= 100 {
        "Done!".to_string()
    } else {
        format!("Processing video… {percent}%")
    };
    format!(
        "[{}{}] {:>3}%  {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent,
        text
    )
}

/// Plain-text summary shown once the video is ready.
pub fn summary(video: &CachedVideo) -> String {
    let mut out = String::new();
    if !video.title.is_empty() {
        out.push_str(&video.title);
        out.push('\n');
    }
    if !video.thumbnail.is_empty() {
        out.push_str(&format!("Thumbnail: {}\n", video.thumbnail));
    }
    out.push_str(&format!("Download MP4: {}\n", video.artifact_url));
    out
}

/// Standalone HTML page with an inline player and a download link.
pub fn html_page(video: &CachedVideo) -> String {
    let title = if video.title.is_empty() {
        "YTView".to_string()
    } else {
        escape_html(&video.title)
    };
    let url = escape_html(&video.artifact_url);
    let poster = if video.thumbnail.is_empty() {
        String::new()
    } else {
        format!(" poster=\"{}\"", escape_html(&video.thumbnail))
    };
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <h2>{title}</h2>\n\
         <video controls width=\"100%\"{poster} src=\"{url}\"></video>\n\
         <p><a href=\"{url}\">Download MP4</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> CachedVideo {
        CachedVideo {
            artifact_url: "https://cdn.example.com/v.mp4?a=1&b=2".to_string(),
            title: "Tom & Jerry <remastered>".to_string(),
            thumbnail: "https://i.example.com/t.jpg".to_string(),
        }
    }

    #[test]
    fn progress_line_fills_bar() {
        let empty = progress_line(0);
        assert!(empty.starts_with(&format!("[{}]", ".".repeat(30))));
        assert!(empty.ends_with("Processing video… 0%"));

        let half = progress_line(50);
        assert!(half.starts_with(&format!("[{}{}]", "#".repeat(15), ".".repeat(15))));

        let full = progress_line(100);
        assert!(full.starts_with(&format!("[{}]", "#".repeat(30))));
        assert!(full.ends_with("Done!"));
        assert_eq!(progress_line(250), full);
    }

    #[test]
    fn summary_lists_link() {
        let s = summary(&video());
        assert!(s.starts_with("Tom & Jerry <remastered>\n"));
        assert!(s.contains("Download MP4: https://cdn.example.com/v.mp4?a=1&b=2"));

        let bare = CachedVideo {
            title: String::new(),
            thumbnail: String::new(),
            ..video()
        };
        assert_eq!(
            summary(&bare),
            "Download MP4: https://cdn.example.com/v.mp4?a=1&b=2\n"
        );
    }

    #[test]
    fn html_is_escaped() {
        let page = html_page(&video());
        assert!(page.contains("<h2>Tom &amp; Jerry &lt;remastered&gt;</h2>"));
        assert!(page.contains("src=\"https://cdn.example.com/v.mp4?a=1&amp;b=2\""));
        assert!(page.contains("poster=\"https://i.example.com/t.jpg\""));
        assert!(!page.contains("<remastered>"));
    }
}
