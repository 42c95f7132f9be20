//! HTTP client for the YouTube Data API v3 `search` and `videos` endpoints.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use memetrends_core::VideoCandidate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::keys::KeySelector;
use crate::rank::rank_shorts;
use crate::types::{SearchListResponse, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";

/// Candidates requested from `search.list` before filtering and ranking.
const SEARCH_PAGE_SIZE: &str = "50";

/// Client for short-form video discovery.
///
/// Holds an injected [`KeySelector`] rather than a global key list so the
/// rotation policy is explicit and swappable.
pub struct ShortsClient {
    client: Client,
    keys: Arc<dyn KeySelector>,
    base_url: Url,
}

impl ShortsClient {
    /// Creates a client pointed at the production Google APIs host.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        keys: Arc<dyn KeySelector>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_url(keys, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`YoutubeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        keys: Arc<dyn KeySelector>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            keys,
            base_url,
        })
    }

    /// Top five short-form videos for `query`, or nothing.
    ///
    /// Wraps [`ShortsClient::search_shorts`]; any error is logged and turned
    /// into an empty list, so callers cannot tell a failed lookup from one
    /// that simply found no qualifying videos.
    pub async fn discover_shorts(&self, query: &str, max_age_days: u32) -> Vec<VideoCandidate> {
        match self.search_shorts(query, max_age_days).await {
            Ok(videos) => {
                tracing::debug!(query, count = videos.len(), "discovered short-form videos");
                videos
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "short-form video lookup failed");
                Vec::new()
            }
        }
    }

    /// Searches for short-form videos published within `max_age_days`,
    /// fetches their statistics and durations, and returns the ranked top five.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure or non-2xx status
    ///   (including quota exhaustion).
    /// - [`YoutubeError::Deserialize`] if either response body is malformed.
    pub async fn search_shorts(
        &self,
        query: &str,
        max_age_days: u32,
    ) -> Result<Vec<VideoCandidate>, YoutubeError> {
        let key = self.keys.select().to_owned();
        let q = format!("{query} #shorts");
        let published_after = published_after(Utc::now(), max_age_days);

        let search_url = self.build_url(
            "youtube/v3/search",
            &key,
            &[
                ("part", "id,snippet"),
                ("q", &q),
                ("maxResults", SEARCH_PAGE_SIZE),
                ("type", "video"),
                ("videoDuration", "short"),
                ("order", "viewCount"),
                ("publishedAfter", &published_after),
            ],
        )?;
        let search: SearchListResponse = self
            .get_json(search_url, &format!("search.list(q={q})"))
            .await?;

        let ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let videos_url = self.build_url(
            "youtube/v3/videos",
            &key,
            &[("part", "snippet,statistics,contentDetails"), ("id", &joined)],
        )?;
        let details: VideoListResponse = self
            .get_json(videos_url, &format!("videos.list(ids={})", ids.len()))
            .await?;

        let candidates: Vec<VideoCandidate> = details
            .items
            .into_iter()
            .map(VideoCandidate::from)
            .collect();
        Ok(rank_shorts(candidates))
    }

    fn build_url(
        &self,
        endpoint: &str,
        key: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", key);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// `publishedAfter` value for a look-back window ending at `now`.
#[must_use]
pub fn published_after(now: DateTime<Utc>, max_age_days: u32) -> String {
    (now - TimeDelta::days(i64::from(max_age_days)))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}
