//! Sequential thumbnail fetching for the spreadsheet export.

use std::collections::HashMap;
use std::time::Duration;

use memetrends_core::Report;
use reqwest::{Client, Url};

use crate::error::ExportError;

const DEFAULT_BASE_URL: &str = "https://i.ytimg.com/";

/// Downloads `hqdefault.jpg` thumbnails one at a time.
///
/// A failed fetch only costs that row its image; it is logged and skipped.
pub struct ThumbnailFetcher {
    client: Client,
    base_url: Url,
}

impl ThumbnailFetcher {
    /// # Errors
    ///
    /// Returns [`ExportError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExportError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ExportError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ExportError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ExportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    /// Image bytes for one video, or `None` on any failure.
    pub async fn fetch(&self, video_id: &str) -> Option<Vec<u8>> {
        let url = match self.base_url.join(&format!("vi/{video_id}/hqdefault.jpg")) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(video_id, error = %e, "invalid thumbnail URL");
                return None;
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(video_id, error = %e, "thumbnail fetch failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(video_id, status = %response.status(), "thumbnail not available");
            return None;
        }
        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::warn!(video_id, error = %e, "thumbnail body read failed");
                None
            }
        }
    }

    /// Thumbnails for every video in the report, keyed by video id.
    pub async fn fetch_for_report(&self, report: &Report) -> HashMap<String, Vec<u8>> {
        let mut images = HashMap::new();
        for row in report.video_rows() {
            let id = &row.video.video_id;
            if images.contains_key(id) {
                continue;
            }
            if let Some(bytes) = self.fetch(id).await {
                images.insert(id.clone(), bytes);
            }
        }
        tracing::debug!(count = images.len(), "fetched thumbnails");
        images
    }
}
