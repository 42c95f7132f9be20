mod dashboard;
mod downloads;
mod report;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use memetrends_core::{Country, LookbackPeriod};
use memetrends_export::{ThumbnailFetcher, YtDlpDownloader};
use memetrends_pipeline::Analyzer;
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};
use crate::session::DashboardSession;

/// Uploaded link spreadsheets are small; this leaves ample headroom.
const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub thumbnails: Arc<ThumbnailFetcher>,
    pub downloader: Arc<YtDlpDownloader>,
    pub session: Arc<Mutex<DashboardSession>>,
}

impl AppState {
    pub fn new(
        analyzer: Analyzer,
        thumbnails: ThumbnailFetcher,
        downloader: YtDlpDownloader,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            thumbnails: Arc::new(thumbnails),
            downloader: Arc::new(downloader),
            session: Arc::new(Mutex::new(DashboardSession::default())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct CountryOption {
    code: Country,
    name: &'static str,
    flag: &'static str,
}

#[derive(Debug, Serialize)]
struct PeriodOption {
    code: LookbackPeriod,
    label: &'static str,
    days: u32,
}

#[derive(Debug, Serialize)]
struct OptionsData {
    countries: Vec<CountryOption>,
    periods: Vec<PeriodOption>,
    default_country: Country,
    default_period: LookbackPeriod,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([header::CONTENT_DISPOSITION])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/api/v1/health", get(health))
        .route("/api/v1/options", get(options))
        .route("/api/v1/runs", post(report::create_run))
        .route(
            "/api/v1/report",
            get(report::get_report).delete(report::reset_session),
        )
        .route("/api/v1/report/export", get(report::export_report))
        .route(
            "/api/v1/downloads",
            post(downloads::create_download).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/v1/downloads/{id}", get(downloads::fetch_download))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn options(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    let countries = Country::ALL
        .into_iter()
        .map(|c| CountryOption {
            code: c,
            name: c.display_name(),
            flag: c.flag(),
        })
        .collect();
    let periods = LookbackPeriod::ALL
        .into_iter()
        .map(|p| PeriodOption {
            code: p,
            label: p.label(),
            days: p.days(),
        })
        .collect();

    Json(ApiResponse {
        data: OptionsData {
            countries,
            periods,
            default_country: Country::default(),
            default_period: LookbackPeriod::default(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
