use chrono::Utc;
use memetrends_core::{Country, CountryOutcome, LookbackPeriod, Report, TermResult};
use memetrends_trends::TrendsClient;
use memetrends_youtube::ShortsClient;

/// Emitted after each country finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    pub completed: usize,
    pub total: usize,
    pub country: Country,
    pub message: String,
}

/// Runs the analysis for `countries` in order and returns the report.
///
/// Every external call is awaited before the next one starts. A trend fetch
/// error marks that country as failed and the run moves on; video lookups
/// never fail a country (see [`ShortsClient::discover_shorts`]).
pub async fn run_analysis<F>(
    trends: &TrendsClient,
    shorts: &ShortsClient,
    countries: &[Country],
    period: LookbackPeriod,
    mut on_progress: F,
) -> Report
where
    F: FnMut(&RunProgress),
{
    let mut report = Report::new(period, Utc::now());
    let total = countries.len();

    for (index, &country) in countries.iter().enumerate() {
        let outcome = analyze_country(trends, shorts, country, period).await;
        let message = match &outcome {
            CountryOutcome::Completed { terms } => {
                let videos: usize = terms.iter().map(|t| t.videos.len()).sum();
                format!(
                    "{}: {} rising terms, {videos} videos",
                    country.display_name(),
                    terms.len()
                )
            }
            CountryOutcome::Failed { error } => {
                format!("{}: trend lookup failed: {error}", country.display_name())
            }
        };
        report.insert(country, outcome);

        on_progress(&RunProgress {
            completed: index + 1,
            total,
            country,
            message,
        });
    }

    let failed = report.failed_countries().len();
    tracing::info!(
        countries = total,
        failed,
        period = %period,
        "analysis run complete"
    );
    report
}

async fn analyze_country(
    trends: &TrendsClient,
    shorts: &ShortsClient,
    country: Country,
    period: LookbackPeriod,
) -> CountryOutcome {
    let terms = match trends.fetch_rising_terms(country).await {
        Ok(terms) => terms,
        Err(e) => {
            tracing::warn!(country = %country.geo(), error = %e, "trend fetch failed");
            return CountryOutcome::Failed {
                error: e.to_string(),
            };
        }
    };
    tracing::info!(country = %country.geo(), terms = terms.len(), "fetched rising terms");

    let mut results = Vec::with_capacity(terms.len());
    for term in terms {
        let videos = shorts.discover_shorts(&term.query, period.days()).await;
        results.push(TermResult { term, videos });
    }
    CountryOutcome::Completed { terms: results }
}
