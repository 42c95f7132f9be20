//! HTTP client for the SerpApi `search.json` endpoint (Google Trends engine).
//!
//! Requests the "rising" related queries for a seed word in one country and
//! caps the result at [`MAX_SEARCH_TERMS`]. Non-2xx statuses and malformed
//! bodies are returned as [`TrendsError`]; an empty or missing `rising` list
//! is a successful empty result.

use std::time::Duration;

use memetrends_core::{Country, SearchTerm, MAX_SEARCH_TERMS};
use reqwest::{Client, Url};

use crate::error::TrendsError;
use crate::types::TrendsResponse;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Client for the SerpApi Google Trends engine.
///
/// Use [`TrendsClient::new`] for production or [`TrendsClient::with_base_url`]
/// to point at a mock server in tests.
pub struct TrendsClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl TrendsClient {
    /// Creates a new client pointed at the production SerpApi host.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, TrendsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`TrendsError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, TrendsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `join` append rather than replace the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("search.json"))
            .map_err(|e| TrendsError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches the rising related queries for a country's seed word.
    ///
    /// # Errors
    ///
    /// See [`TrendsClient::fetch_rising_queries`].
    pub async fn fetch_rising_terms(
        &self,
        country: Country,
    ) -> Result<Vec<SearchTerm>, TrendsError> {
        self.fetch_rising_queries(country.seed_term(), country.geo(), country.locale())
            .await
    }

    /// Fetches up to [`MAX_SEARCH_TERMS`] rising related queries for `term`.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`TrendsError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_rising_queries(
        &self,
        term: &str,
        geo: &str,
        locale: &str,
    ) -> Result<Vec<SearchTerm>, TrendsError> {
        let url = self.build_url(&[
            ("engine", "google_trends"),
            ("q", term),
            ("geo", geo),
            ("hl", locale),
            ("data_type", "RELATED_QUERIES"),
        ]);

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: TrendsResponse =
            serde_json::from_str(&body).map_err(|e| TrendsError::Deserialize {
                context: format!("google_trends(q={term}, geo={geo})"),
                source: e,
            })?;

        if let Some(message) = parsed.error.as_deref() {
            tracing::warn!(
                geo,
                term,
                provider_error = message,
                "trends provider reported no data"
            );
        }

        let rising = parsed
            .related_queries
            .and_then(|rq| rq.rising)
            .unwrap_or_default();

        let terms: Vec<SearchTerm> = rising
            .into_iter()
            .take(MAX_SEARCH_TERMS)
            .map(SearchTerm::from)
            .collect();

        tracing::debug!(geo, term, count = terms.len(), "fetched rising queries");
        Ok(terms)
    }

    /// Builds the request URL with percent-encoded query parameters and the API key.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
