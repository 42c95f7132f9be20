use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use memetrends_export::{run_bulk_download, DownloadError, DownloadFailure};
use serde::Serialize;
use uuid::Uuid;

use crate::middleware::RequestId;
use crate::session::StoredArchive;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub(super) struct DownloadSummary {
    pub id: Uuid,
    pub file_name: String,
    pub total: usize,
    pub downloaded: usize,
    pub failures: Vec<DownloadFailure>,
}

fn map_download_error(request_id: String, error: &DownloadError) -> ApiError {
    match error {
        DownloadError::MissingUrlColumn
        | DownloadError::EmptyWorkbook
        | DownloadError::Spreadsheet(_) => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "bulk download failed");
            ApiError::new(request_id, "internal_error", "bulk download failed")
        }
    }
}

/// Accepts a spreadsheet in the `file` multipart field, downloads every
/// linked video and keeps the zip until it is fetched or a newer upload
/// replaces it.
pub(super) async fn create_download(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DownloadSummary>>, ApiError> {
    let mut upload = None;
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            ApiError::new(req_id.0.clone(), "bad_request", format!("invalid upload: {e}"))
        })?;
        let Some(field) = field else { break };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(req_id.0.clone(), "bad_request", format!("invalid upload: {e}"))
        })?;
        upload = Some(bytes);
        break;
    }
    let upload = upload.ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "bad_request",
            "multipart field 'file' is required",
        )
    })?;

    let archive = run_bulk_download(state.downloader.as_ref(), &upload, |done, total| {
        tracing::info!(done, total, "bulk download progress");
    })
    .await
    .map_err(|e| map_download_error(req_id.0.clone(), &e))?;

    let outcome = archive.outcome;
    let file_name = archive.file_name;
    let id = state.session.lock().await.store_archive(StoredArchive {
        file_name: file_name.clone(),
        bytes: archive.bytes,
    });

    Ok(Json(ApiResponse {
        data: DownloadSummary {
            id,
            file_name,
            total: outcome.total,
            downloaded: outcome.downloaded,
            failures: outcome.failures,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Serves a stored archive once and forgets it.
pub(super) async fn fetch_download(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let archive = state.session.lock().await.take_archive(id);
    let archive = archive
        .ok_or_else(|| ApiError::new(req_id.0, "not_found", format!("no archive with id {id}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", archive.file_name),
            ),
        ],
        archive.bytes,
    )
        .into_response())
}
