//! Artifact URL cleanup.

/// Collapses every run of two or more `/` into a single `/`, except the `//`
/// that directly follows a `:` (the scheme separator in `https://`).
///
/// The conversion service occasionally returns download links with doubled
/// path separators, e.g. `https://cdn.example.com//files///a.mp4`.
/// Applying this twice gives the same result as applying it once.
pub fn sanitize_artifact_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut chars = url.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c != '/' {
            out.push(c);
            prev = Some(c);
            continue;
        }
        let mut run = 1usize;
        while chars.peek() == Some(&'/') {
            chars.next();
            run += 1;
        }
        if prev == Some(':') && run >= 2 {
            out.push_str("//");
        } else {
            out.push('/');
        }
        prev = Some('/');
    }

    out
}
