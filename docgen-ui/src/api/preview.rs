//! PDF preview passthrough
//!
//! Lets the browser open a generated PDF in its own tab without talking to
//! the backend directly.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use docgen_common::ArtifactFormat;

use crate::{error::ApiResult, AppState};

/// Build preview routes
pub fn preview_routes() -> Router<AppState> {
    Router::new().route("/preview/:file_id", get(preview_pdf))
}

/// GET /preview/:file_id
///
/// Fetches the PDF artifact and serves it inline.
pub async fn preview_pdf(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let bytes = state
        .workflow
        .fetch_artifact(&file_id, ArtifactFormat::Pdf)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, ArtifactFormat::Pdf.content_type()),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        bytes,
    )
        .into_response())
}
