use std::sync::Arc;

use memetrends_core::{AppConfig, Country, LookbackPeriod, Report};
use memetrends_trends::{TrendsClient, TrendsError};
use memetrends_youtube::{RandomKeyPool, ShortsClient, YoutubeError};
use thiserror::Error;

use crate::run::{run_analysis, RunProgress};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("trends client: {0}")]
    Trends(#[from] TrendsError),

    #[error("video client: {0}")]
    Youtube(#[from] YoutubeError),
}

/// The two provider clients a run needs, built once per process.
pub struct Analyzer {
    trends: TrendsClient,
    shorts: ShortsClient,
}

impl Analyzer {
    #[must_use]
    pub fn new(trends: TrendsClient, shorts: ShortsClient) -> Self {
        Self { trends, shorts }
    }

    /// Builds both clients from the configured keys, timeouts and base URLs.
    /// Video API keys are drawn at random from the configured pool.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if either HTTP client cannot be built, a base
    /// URL does not parse, or the key pool is empty.
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let trends = TrendsClient::with_base_url(
            &config.serpapi_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.trends_base_url,
        )?;
        let keys = RandomKeyPool::new(config.youtube_api_keys.clone())?;
        let shorts = ShortsClient::with_base_url(
            Arc::new(keys),
            config.request_timeout_secs,
            &config.user_agent,
            &config.youtube_base_url,
        )?;
        Ok(Self::new(trends, shorts))
    }

    /// See [`run_analysis`].
    pub async fn run<F>(
        &self,
        countries: &[Country],
        period: LookbackPeriod,
        on_progress: F,
    ) -> Report
    where
        F: FnMut(&RunProgress),
    {
        run_analysis(&self.trends, &self.shorts, countries, period, on_progress).await
    }
}
