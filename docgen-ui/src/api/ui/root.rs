//! Root page handlers
//!
//! Every page load is a render pass: each upload in the session is checked
//! against the backend, oldest first. The "Refresh Status" button simply
//! reloads this page.

use axum::{
    extract::{Multipart, State},
    response::Html,
};

use super::render::{render_page, Notice};
use crate::{api::form::read_upload_form, AppState};

/// GET /
pub async fn root_page(State(state): State<AppState>) -> Html<String> {
    let views = state.workflow.render_pass().await;
    Html(render_page(&views, None))
}

/// POST /upload
///
/// Submit the form, then render the page with a success or error notice.
/// A failed submission leaves the session unchanged and the form usable.
pub async fn upload_page(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let notice = match read_upload_form(multipart).await {
        Ok(form) => match state
            .workflow
            .submit_raw(form.file, &form.doc_type, &form.doc_level)
            .await
        {
            Ok(record) => {
                state.watch_upload(record.file_id()).await;
                Notice::success(format!(
                    "File uploaded successfully! File ID: {}",
                    record.file_id()
                ))
            }
            Err(e) => Notice::error(e.to_string()),
        },
        Err(e) => Notice::error(e.to_string()),
    };

    let views = state.workflow.render_pass().await;
    Html(render_page(&views, Some(&notice)))
}
