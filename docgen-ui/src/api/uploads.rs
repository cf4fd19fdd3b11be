//! Upload JSON API
//!
//! POST /api/uploads, GET /api/uploads, GET /api/uploads/:file_id/status,
//! GET /api/uploads/:file_id/links

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    api::form::read_upload_form,
    error::{ApiError, ApiResult},
    session::{TrackedUpload, UploadRecord},
    workflow::{DownloadLink, PollOutcome},
    AppState,
};

/// GET /api/uploads response
#[derive(Debug, Serialize)]
pub struct UploadListResponse {
    pub count: usize,
    pub uploads: Vec<TrackedUpload>,
}

/// GET /api/uploads/:file_id/links response
#[derive(Debug, Serialize)]
pub struct DownloadLinksResponse {
    pub file_id: String,
    pub links: Vec<DownloadLink>,
}

/// Build upload API routes
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/api/uploads", get(list_uploads).post(create_upload))
        .route("/api/uploads/:file_id/status", get(upload_status))
        .route("/api/uploads/:file_id/links", get(upload_links))
}

/// POST /api/uploads
///
/// Submit a media file. Returns 201 with the new record; nothing is recorded
/// on failure.
pub async fn create_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadRecord>)> {
    let form = read_upload_form(multipart).await?;
    let record = state
        .workflow
        .submit_raw(form.file, &form.doc_type, &form.doc_level)
        .await?;

    state.watch_upload(record.file_id()).await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/uploads
///
/// Session uploads, oldest first, with their last known readiness. Does not
/// contact the backend.
pub async fn list_uploads(State(state): State<AppState>) -> Json<UploadListResponse> {
    let uploads = state.workflow.session().snapshot().await;
    Json(UploadListResponse {
        count: uploads.len(),
        uploads,
    })
}

/// GET /api/uploads/:file_id/status
///
/// Poll one upload: existence check, plus progress while not ready.
pub async fn upload_status(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Json<PollOutcome>> {
    ensure_known(&state, &file_id).await?;
    Ok(Json(state.workflow.poll(&file_id).await))
}

/// GET /api/uploads/:file_id/links
///
/// Download URLs for every artifact format. Nothing is fetched.
pub async fn upload_links(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Json<DownloadLinksResponse>> {
    ensure_known(&state, &file_id).await?;
    let links = state.workflow.download_links(&file_id);
    Ok(Json(DownloadLinksResponse { file_id, links }))
}

async fn ensure_known(state: &AppState, file_id: &str) -> ApiResult<()> {
    match state.workflow.session().get(file_id).await {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(format!(
            "Upload not found in this session: {}",
            file_id
        ))),
    }
}
