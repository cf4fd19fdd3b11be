//! Multipart upload form parsing
//!
//! Shared by the HTML form handler and the JSON API. Field names match the
//! backend's: `file`, `doc_type`, `doc_level`.

use axum::extract::Multipart;
use docgen_common::{DocLevel, DocType};

use crate::error::{ApiError, ApiResult};
use crate::media::MediaUpload;

/// Parsed upload form
#[derive(Debug)]
pub struct UploadForm {
    pub file: MediaUpload,
    /// Raw selector values; validated by the workflow
    pub doc_type: String,
    pub doc_level: String,
}

/// Read the upload form from a multipart body
///
/// Missing selectors fall back to the page's preselected values; unknown
/// fields are ignored.
pub async fn read_upload_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut file = None;
    let mut doc_type = None;
    let mut doc_level = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Could not read file: {}", e)))?;
                file = Some(MediaUpload::new(filename, bytes.to_vec(), mime));
            }
            "doc_type" => {
                doc_type = Some(read_text(field).await?);
            }
            "doc_level" => {
                doc_level = Some(read_text(field).await?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown upload form field");
            }
        }
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("No file selected".to_string()))?;

    Ok(UploadForm {
        file,
        doc_type: doc_type.unwrap_or_else(|| DocType::default().as_str().to_string()),
        doc_level: doc_level.unwrap_or_else(|| DocLevel::default().as_str().to_string()),
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload form: {}", e)))
}
