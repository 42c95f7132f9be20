use memetrends_core::VideoCandidate;

const SHORTS_MARKER: &str = "youtube.com/shorts/";

/// Rewrites a Shorts link to the canonical watch URL.
///
/// The video id is the last path segment, without any query string or
/// fragment. Anything that is not a Shorts link is returned unchanged.
#[must_use]
pub fn normalize_video_url(url: &str) -> String {
    let trimmed = url.trim();
    if !trimmed.contains(SHORTS_MARKER) {
        return trimmed.to_string();
    }

    let without_suffix = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    match without_suffix.rsplit('/').next() {
        Some(id) if !id.is_empty() => VideoCandidate::watch_url(id),
        _ => trimmed.to_string(),
    }
}
