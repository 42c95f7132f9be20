use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use memetrends_core::{Country, LookbackPeriod, Report};
use memetrends_export::REPORT_FILE_NAME;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
pub(super) struct RunRequest {
    pub countries: Vec<Country>,
    #[serde(default)]
    pub period: LookbackPeriod,
}

#[derive(Debug, Serialize)]
pub(super) struct ResetData {
    pub cleared: bool,
}

fn no_report(request_id: String) -> ApiError {
    ApiError::new(request_id, "not_found", "no report yet; start a run first")
}

/// Runs the analysis for the requested countries and makes it the session
/// report. The session lock is not held while the providers are queried.
pub(super) async fn create_run(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<RunRequest>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    if request.countries.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "select at least one country",
        ));
    }

    let report = state
        .analyzer
        .run(&request.countries, request.period, |p| {
            tracing::info!(
                completed = p.completed,
                total = p.total,
                country = %p.country.geo(),
                "{}",
                p.message
            );
        })
        .await;

    state.session.lock().await.replace_report(report.clone());

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let report = state.session.lock().await.report().cloned();
    let report = report.ok_or_else(|| no_report(req_id.0.clone()))?;
    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn reset_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ResetData>> {
    state.session.lock().await.reset();
    tracing::info!("dashboard session reset");
    Json(ApiResponse {
        data: ResetData { cleared: true },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// The current report as a spreadsheet attachment.
pub(super) async fn export_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let report = state.session.lock().await.report().cloned();
    let report = report.ok_or_else(|| no_report(req_id.0.clone()))?;

    let bytes = memetrends_export::export_report(&report, &state.thumbnails)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "spreadsheet export failed");
            ApiError::new(req_id.0.clone(), "internal_error", "spreadsheet export failed")
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
