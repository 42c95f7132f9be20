//! End-to-end analysis runs against wiremock stand-ins for both providers.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use memetrends_core::{Country, LookbackPeriod};
use memetrends_pipeline::{run_analysis, RunProgress};
use memetrends_trends::TrendsClient;
use memetrends_youtube::{FixedKey, ShortsClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches a search whose `publishedAfter` lies `days` before now, within a
/// few minutes of slack for the time the request took to arrive.
struct PublishedWithin {
    days: i64,
}

impl Match for PublishedWithin {
    fn matches(&self, request: &Request) -> bool {
        let Some((_, value)) = request
            .url
            .query_pairs()
            .find(|(name, _)| name == "publishedAfter")
        else {
            return false;
        };
        let Ok(sent) = DateTime::parse_from_rfc3339(&value) else {
            return false;
        };
        let expected = Utc::now() - TimeDelta::days(self.days);
        (expected - sent.with_timezone(&Utc)).num_seconds().abs() < 300
    }
}

fn clients(server: &MockServer) -> (TrendsClient, ShortsClient) {
    let trends = TrendsClient::with_base_url("serp-key", 30, "memetrends-test/0.1", &server.uri())
        .expect("trends client");
    let shorts = ShortsClient::with_base_url(
        Arc::new(FixedKey("yt-key".to_string())),
        30,
        "memetrends-test/0.1",
        &server.uri(),
    )
    .expect("shorts client");
    (trends, shorts)
}

fn rising(queries: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = queries
        .iter()
        .map(|q| json!({ "query": q, "value": "+200%", "extracted_value": 200 }))
        .collect();
    json!({ "related_queries": { "rising": items } })
}

async fn mount_trends(server: &MockServer, geo: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("geo", geo))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_videos(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": { "videoId": "short1" } },
                { "id": { "videoId": "long1" } },
                { "id": { "videoId": "short2" } }
            ]
        })))
        .mount(server)
        .await;

    let video = |id: &str, views: &str, duration: &str| {
        json!({
            "id": id,
            "snippet": {
                "title": id,
                "channelTitle": "memes",
                "publishedAt": "2025-06-01T00:00:00Z"
            },
            "statistics": { "viewCount": views, "likeCount": "1" },
            "contentDetails": { "duration": duration }
        })
    };
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                video("short1", "100", "PT30S"),
                video("long1", "999999", "PT3M"),
                video("short2", "500", "PT58S")
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn failing_country_does_not_affect_the_others() {
    let server = MockServer::start().await;
    mount_trends(&server, "KR", ResponseTemplate::new(500)).await;
    mount_trends(
        &server,
        "US",
        ResponseTemplate::new(200).set_body_json(rising(&["npc", "skibidi"])),
    )
    .await;
    mount_trends(
        &server,
        "JP",
        ResponseTemplate::new(200).set_body_json(json!({
            "error": "Google Trends hasn't returned any results for this query."
        })),
    )
    .await;
    mount_videos(&server).await;

    let (trends, shorts) = clients(&server);
    let mut progress: Vec<RunProgress> = Vec::new();
    let report = run_analysis(
        &trends,
        &shorts,
        &Country::ALL,
        LookbackPeriod::Week,
        |p| progress.push(p.clone()),
    )
    .await;

    assert_eq!(report.period, LookbackPeriod::Week);
    assert_eq!(report.countries.len(), 3);
    assert_eq!(report.failed_countries(), vec![Country::Korea]);

    let kr = report.get(Country::Korea).expect("korea");
    assert!(kr.error().is_some_and(|e| e.contains("500")));

    let us = report.get(Country::UnitedStates).expect("us");
    let queries: Vec<&str> = us.terms().map(|t| t.query.as_str()).collect();
    assert_eq!(queries, vec!["npc", "skibidi"]);
    let ids: Vec<&str> = us
        .videos_for("npc")
        .expect("npc videos")
        .iter()
        .map(|v| v.video_id.as_str())
        .collect();
    assert_eq!(ids, vec!["short2", "short1"], "long video filtered, views desc");

    let jp = report.get(Country::Japan).expect("jp");
    assert!(jp.error().is_none());
    assert_eq!(jp.terms().count(), 0);

    let steps: Vec<(usize, usize, Country)> = progress
        .iter()
        .map(|p| (p.completed, p.total, p.country))
        .collect();
    assert_eq!(
        steps,
        vec![
            (1, 3, Country::Korea),
            (2, 3, Country::UnitedStates),
            (3, 3, Country::Japan),
        ]
    );
    assert!(progress[0].message.contains("failed"));
    assert!(progress[1].message.contains("2 rising terms"));
}

#[tokio::test]
async fn video_lookup_failure_keeps_the_term_with_no_videos() {
    let server = MockServer::start().await;
    mount_trends(
        &server,
        "US",
        ResponseTemplate::new(200).set_body_json(rising(&["npc"])),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (trends, shorts) = clients(&server);
    let report = run_analysis(
        &trends,
        &shorts,
        &[Country::UnitedStates],
        LookbackPeriod::Day,
        |_| {},
    )
    .await;

    let us = report.get(Country::UnitedStates).expect("us");
    assert!(us.error().is_none());
    assert_eq!(us.videos_for("npc").map(<[_]>::len), Some(0));
}

#[tokio::test]
async fn each_term_is_searched_with_shorts_hashtag() {
    let server = MockServer::start().await;
    mount_trends(
        &server,
        "KR",
        ResponseTemplate::new(200).set_body_json(rising(&["밈 챌린지"])),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "밈 챌린지 #shorts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (trends, shorts) = clients(&server);
    let report = run_analysis(
        &trends,
        &shorts,
        &[Country::Korea],
        LookbackPeriod::Month,
        |_| {},
    )
    .await;
    assert_eq!(report.get(Country::Korea).map(|c| c.terms().count()), Some(1));
}

#[tokio::test]
async fn lookback_period_sets_the_video_search_window() {
    let server = MockServer::start().await;
    mount_trends(
        &server,
        "US",
        ResponseTemplate::new(200).set_body_json(rising(&["npc"])),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(PublishedWithin { days: 30 })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (trends, shorts) = clients(&server);
    run_analysis(
        &trends,
        &shorts,
        &[Country::UnitedStates],
        LookbackPeriod::Month,
        |_| {},
    )
    .await;
}
