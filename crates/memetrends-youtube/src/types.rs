//! YouTube Data API v3 response types for `search.list` and `videos.list`.

use chrono::{DateTime, Utc};
use memetrends_core::VideoCandidate;
use serde::Deserialize;

use crate::duration::parse_iso8601_duration;

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

/// `videoId` is absent for channel and playlist hits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    pub content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
}

/// Counts are decimal strings on the wire; hidden like counts are omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    pub duration: String,
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse::<u64>().ok()).unwrap_or(0)
}

impl From<VideoItem> for VideoCandidate {
    fn from(item: VideoItem) -> Self {
        VideoCandidate {
            url: VideoCandidate::watch_url(&item.id),
            view_count: parse_count(item.statistics.view_count.as_deref()),
            like_count: parse_count(item.statistics.like_count.as_deref()),
            duration_secs: parse_iso8601_duration(&item.content_details.duration),
            title: item.snippet.title,
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
            video_id: item.id,
        }
    }
}
