//! Session report data model.
//!
//! A [`Report`] is built by one analysis run and holds, per selected country,
//! either the rising search terms with their ranked short-form videos or the
//! error that stopped that country's trend fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Country, LookbackPeriod};

/// Upper bound on rising terms kept per country per run.
pub const MAX_SEARCH_TERMS: usize = 15;

/// Upper bound on ranked videos kept per search term.
pub const MAX_VIDEOS_PER_TERM: usize = 5;

/// Longest duration, in seconds, that still counts as a short-form video.
pub const MAX_SHORT_DURATION_SECS: u64 = 60;

/// A rising related query reported by the trends provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    pub query: String,
    /// Magnitude of the rise as the provider formats it (`"+350%"`, `"Breakout"`).
    pub value: String,
}

/// A short-form video matched to a search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub view_count: u64,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
    pub duration_secs: u64,
    pub url: String,
}

impl VideoCandidate {
    /// Canonical watch URL for a video id.
    #[must_use]
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    /// High-quality default thumbnail (480x360).
    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", self.video_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermResult {
    pub term: SearchTerm,
    pub videos: Vec<VideoCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CountryOutcome {
    Completed { terms: Vec<TermResult> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReport {
    pub country: Country,
    #[serde(flatten)]
    pub outcome: CountryOutcome,
}

impl CountryReport {
    /// Rising terms in provider order; empty for a failed country.
    pub fn terms(&self) -> impl Iterator<Item = &SearchTerm> {
        self.term_results().iter().map(|r| &r.term)
    }

    /// Ranked videos for the term whose query text equals `query`.
    #[must_use]
    pub fn videos_for(&self, query: &str) -> Option<&[VideoCandidate]> {
        self.term_results()
            .iter()
            .find(|r| r.term.query == query)
            .map(|r| r.videos.as_slice())
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CountryOutcome::Failed { error } => Some(error),
            CountryOutcome::Completed { .. } => None,
        }
    }

    fn term_results(&self) -> &[TermResult] {
        match &self.outcome {
            CountryOutcome::Completed { terms } => terms,
            CountryOutcome::Failed { .. } => &[],
        }
    }
}

/// One row of the flattened video listing used by exports and the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct VideoRow<'a> {
    pub country: Country,
    pub term: &'a SearchTerm,
    pub video: &'a VideoCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub period: LookbackPeriod,
    pub generated_at: DateTime<Utc>,
    pub countries: Vec<CountryReport>,
}

impl Report {
    #[must_use]
    pub fn new(period: LookbackPeriod, generated_at: DateTime<Utc>) -> Self {
        Self {
            period,
            generated_at,
            countries: Vec::new(),
        }
    }

    /// Record a country's outcome, replacing an earlier entry for the same country.
    pub fn insert(&mut self, country: Country, outcome: CountryOutcome) {
        if let Some(existing) = self.countries.iter_mut().find(|c| c.country == country) {
            existing.outcome = outcome;
        } else {
            self.countries.push(CountryReport { country, outcome });
        }
    }

    #[must_use]
    pub fn get(&self, country: Country) -> Option<&CountryReport> {
        self.countries.iter().find(|c| c.country == country)
    }

    /// Every video across countries and terms, in report order.
    pub fn video_rows(&self) -> impl Iterator<Item = VideoRow<'_>> {
        self.countries.iter().flat_map(|c| {
            c.term_results().iter().flat_map(move |r| {
                r.videos.iter().map(move |video| VideoRow {
                    country: c.country,
                    term: &r.term,
                    video,
                })
            })
        })
    }

    /// Every `(country, term)` pair for completed countries.
    pub fn term_rows(&self) -> impl Iterator<Item = (Country, &SearchTerm)> {
        self.countries
            .iter()
            .flat_map(|c| c.terms().map(move |t| (c.country, t)))
    }

    #[must_use]
    pub fn failed_countries(&self) -> Vec<Country> {
        self.countries
            .iter()
            .filter(|c| c.error().is_some())
            .map(|c| c.country)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn video(id: &str, views: u64) -> VideoCandidate {
        VideoCandidate {
            video_id: id.to_string(),
            title: format!("title {id}"),
            channel_title: "channel".to_string(),
            view_count: views,
            like_count: views / 10,
            published_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            duration_secs: 30,
            url: VideoCandidate::watch_url(id),
        }
    }

    fn term(query: &str) -> SearchTerm {
        SearchTerm {
            query: query.to_string(),
            value: "+100%".to_string(),
        }
    }

    fn sample_report() -> Report {
        let mut report = Report::new(LookbackPeriod::Week, Utc::now());
        report.insert(
            Country::Korea,
            CountryOutcome::Completed {
                terms: vec![
                    TermResult {
                        term: term("a"),
                        videos: vec![video("v1", 10), video("v2", 5)],
                    },
                    TermResult {
                        term: term("b"),
                        videos: vec![],
                    },
                ],
            },
        );
        report.insert(
            Country::Japan,
            CountryOutcome::Failed {
                error: "HTTP error: 500".to_string(),
            },
        );
        report
    }

    #[test]
    fn urls_are_derived_from_video_id() {
        let v = video("abc123", 1);
        assert_eq!(v.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(v.thumbnail_url(), "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
    }

    #[test]
    fn lookup_by_country_and_term() {
        let report = sample_report();
        let kr = report.get(Country::Korea).expect("korea present");
        assert_eq!(kr.terms().count(), 2);
        assert_eq!(kr.videos_for("a").map(<[_]>::len), Some(2));
        assert_eq!(kr.videos_for("b").map(<[_]>::len), Some(0));
        assert!(kr.videos_for("missing").is_none());
        assert!(report.get(Country::UnitedStates).is_none());
    }

    #[test]
    fn failed_country_has_no_terms() {
        let report = sample_report();
        let jp = report.get(Country::Japan).expect("japan present");
        assert_eq!(jp.error(), Some("HTTP error: 500"));
        assert_eq!(jp.terms().count(), 0);
        assert_eq!(report.failed_countries(), vec![Country::Japan]);
    }

    #[test]
    fn rows_flatten_in_report_order() {
        let report = sample_report();
        let ids: Vec<&str> = report
            .video_rows()
            .map(|r| r.video.video_id.as_str())
            .collect();
        assert_eq!(ids, vec!["v1", "v2"]);
        assert_eq!(report.term_rows().count(), 2);
    }

    #[test]
    fn insert_replaces_existing_country() {
        let mut report = sample_report();
        report.insert(Country::Japan, CountryOutcome::Completed { terms: vec![] });
        assert_eq!(report.countries.len(), 2);
        assert!(report.failed_countries().is_empty());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let report = sample_report();
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["countries"][0]["country"], "KR");
        assert_eq!(json["countries"][0]["status"], "completed");
        assert_eq!(json["countries"][1]["status"], "failed");
        assert_eq!(json["countries"][1]["error"], "HTTP error: 500");
        assert_eq!(json["period"], "week");
    }
}
