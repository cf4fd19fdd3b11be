//! Documentation backend HTTP client
//!
//! Thin wrapper over the four backend calls the client depends on:
//! - `POST /upload` (multipart: `file`, `doc_type`, `doc_level`)
//! - `GET /documentation/{file_id}` (existence check, 200 iff ready)
//! - `GET /status/{file_id}` (progress report)
//! - `GET /download/{file_id}?format=...` (raw artifact bytes)
//!
//! JSON bodies are validated against the schema types in
//! `docgen_common::api` before they reach the rest of the service.

use std::time::Duration;

use docgen_common::api::{BackendErrorBody, ProgressReport, UploadResponse};
use docgen_common::{ArtifactFormat, DocLevel, DocType};
use reqwest::StatusCode;
use thiserror::Error;

use crate::media::MediaUpload;

const USER_AGENT: &str = concat!("docgen-ui/", env!("CARGO_PKG_VERSION"));

/// Backend client errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection refused, timeout, or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with something other than 200 OK
    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the documented schema
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// HTTP status reported by the backend, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Documentation backend API client
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url`
    ///
    /// `base_url` is expected without a trailing slash (see
    /// `docgen_common::config::normalize_base_url`). With no `timeout` the
    /// transport default applies.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Backend base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieval URL for an artifact
    ///
    /// Pure: `{base}/download/{file_id}?format={format}`. Used both for the
    /// browser download links and for the client's own fetches.
    pub fn build_url(&self, file_id: &str, format: ArtifactFormat) -> String {
        format!(
            "{}/download/{}?format={}",
            self.base_url,
            urlencoding::encode(file_id),
            format.as_str()
        )
    }

    fn documentation_url(&self, file_id: &str) -> String {
        format!("{}/documentation/{}", self.base_url, urlencoding::encode(file_id))
    }

    fn status_url(&self, file_id: &str) -> String {
        format!("{}/status/{}", self.base_url, urlencoding::encode(file_id))
    }

    /// Send a media file with its document parameters
    ///
    /// Returns the validated response body. A body with `success: false` is
    /// returned as-is; callers decide how to report the rejection.
    pub async fn upload(
        &self,
        upload: MediaUpload,
        doc_type: DocType,
        doc_level: DocLevel,
    ) -> Result<UploadResponse, BackendError> {
        let mime = upload.effective_mime().to_string();
        let size = upload.len();
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename.clone())
            .mime_str(&mime)
            .map_err(|e| BackendError::Malformed(format!("invalid MIME type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("doc_type", doc_type.as_str())
            .text("doc_level", doc_level.as_str());

        tracing::debug!(
            filename = %upload.filename,
            size,
            doc_type = %doc_type,
            doc_level = %doc_level,
            "Uploading media to backend"
        );

        let response = self
            .http_client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), "Upload response received");

        if status != StatusCode::OK {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: BackendErrorBody::from_bytes(&body).reason(),
            });
        }

        let upload_response: UploadResponse = serde_json::from_slice(&body)
            .map_err(|e| BackendError::Malformed(format!("upload response: {}", e)))?;
        upload_response
            .validate()
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(upload_response)
    }

    /// Existence check for generated documentation
    ///
    /// Exactly HTTP 200 means ready; any other status or a transport failure
    /// means not ready.
    pub async fn documentation_exists(&self, file_id: &str) -> bool {
        match self.http_client.get(self.documentation_url(file_id)).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    file_id = %file_id,
                    status = status.as_u16(),
                    "Documentation existence check"
                );
                status == StatusCode::OK
            }
            Err(e) => {
                tracing::debug!(
                    file_id = %file_id,
                    error = %e,
                    "Documentation existence check failed"
                );
                false
            }
        }
    }

    /// Processing progress for an upload
    pub async fn progress(&self, file_id: &str) -> Result<ProgressReport, BackendError> {
        let response = self
            .http_client
            .get(self.status_url(file_id))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: BackendErrorBody::from_bytes(&body).reason(),
            });
        }

        let report: ProgressReport = serde_json::from_slice(&body)
            .map_err(|e| BackendError::Malformed(format!("status response: {}", e)))?;
        report
            .validate()
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(report)
    }

    /// Raw artifact bytes in the requested format
    pub async fn download(
        &self,
        file_id: &str,
        format: ArtifactFormat,
    ) -> Result<Vec<u8>, BackendError> {
        let response = self
            .http_client
            .get(self.build_url(file_id, format))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.bytes().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: BackendErrorBody::from_bytes(&body).reason(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        tracing::debug!(
            file_id = %file_id,
            format = %format,
            size = bytes.len(),
            "Artifact downloaded"
        );

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new("http://localhost:7000", None).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(BackendClient::new("http://localhost:7000", Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn test_build_url_shape() {
        let client = client();
        assert_eq!(
            client.build_url("abc123", ArtifactFormat::Pdf),
            "http://localhost:7000/download/abc123?format=pdf"
        );
        assert_eq!(
            client.build_url("abc123", ArtifactFormat::Docx),
            "http://localhost:7000/download/abc123?format=docx"
        );
    }

    #[test]
    fn test_build_url_is_deterministic() {
        let client = client();
        for format in ArtifactFormat::all_variants() {
            assert_eq!(
                client.build_url("f-42", format),
                client.build_url("f-42", format)
            );
        }
    }

    #[test]
    fn test_build_url_escapes_path_characters() {
        let client = client();
        assert_eq!(
            client.build_url("a/b c", ArtifactFormat::Json),
            "http://localhost:7000/download/a%2Fb%20c?format=json"
        );
    }

    #[test]
    fn test_status_error_exposes_code() {
        let err = BackendError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(BackendError::Network("refused".into()).status(), None);
    }
}
