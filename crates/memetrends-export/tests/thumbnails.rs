//! Thumbnail fetching against a wiremock image host.

use chrono::Utc;
use memetrends_core::{
    Country, CountryOutcome, LookbackPeriod, Report, SearchTerm, TermResult, VideoCandidate,
};
use memetrends_export::{export_report, ThumbnailFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn video(id: &str) -> VideoCandidate {
    VideoCandidate {
        video_id: id.to_string(),
        title: format!("title {id}"),
        channel_title: "channel".to_string(),
        view_count: 1,
        like_count: 0,
        published_at: Utc::now(),
        duration_secs: 10,
        url: VideoCandidate::watch_url(id),
    }
}

fn report(ids: &[&str]) -> Report {
    let mut report = Report::new(LookbackPeriod::Day, Utc::now());
    report.insert(
        Country::UnitedStates,
        CountryOutcome::Completed {
            terms: vec![TermResult {
                term: SearchTerm {
                    query: "meme".to_string(),
                    value: "+50%".to_string(),
                },
                videos: ids.iter().map(|id| video(id)).collect(),
            }],
        },
    );
    report
}

fn fetcher(server: &MockServer) -> ThumbnailFetcher {
    ThumbnailFetcher::with_base_url(5, "memetrends-test/0.1", &server.uri()).expect("fetcher")
}

#[tokio::test]
async fn fetches_hqdefault_and_skips_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vi/ok/hqdefault.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vi/gone/hqdefault.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let images = fetcher(&server).fetch_for_report(&report(&["ok", "gone"])).await;
    assert_eq!(images.len(), 1);
    assert_eq!(images.get("ok").map(Vec::as_slice), Some(&b"jpeg-bytes"[..]));
}

#[tokio::test]
async fn export_succeeds_when_every_thumbnail_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let bytes = export_report(&report(&["a", "b"]), &fetcher(&server))
        .await
        .expect("export");
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip package");
}

#[tokio::test]
async fn unreachable_host_is_not_fatal() {
    let fetcher = ThumbnailFetcher::with_base_url(1, "memetrends-test/0.1", "http://127.0.0.1:1")
        .expect("fetcher");
    assert!(fetcher.fetch("x").await.is_none());
}
