use memetrends_core::{VideoCandidate, MAX_SHORT_DURATION_SECS, MAX_VIDEOS_PER_TERM};

#[must_use]
pub fn is_short(candidate: &VideoCandidate) -> bool {
    candidate.duration_secs <= MAX_SHORT_DURATION_SECS
}

/// Drops anything longer than 60 seconds, orders the rest by view count
/// (highest first) and keeps the top five.
///
/// The sort is stable: equal view counts keep their API order.
#[must_use]
pub fn rank_shorts(candidates: Vec<VideoCandidate>) -> Vec<VideoCandidate> {
    let mut shorts: Vec<VideoCandidate> = candidates.into_iter().filter(is_short).collect();
    shorts.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    shorts.truncate(MAX_VIDEOS_PER_TERM);
    shorts
}
