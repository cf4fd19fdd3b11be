//! Error types for docgen-ui
//!
//! Workflow errors are terminal to the operation that raised them only;
//! none of them stop the service. "Not ready yet" is not an error at all and
//! is modelled as `ReadinessState::NotReady`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docgen_common::ArtifactFormat;
use serde_json::json;
use thiserror::Error;

use crate::client::BackendError;

/// Submission failed; no record was created and the user may retry
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// File or parameters failed client-side validation
    #[error("{0}")]
    InvalidInput(String),

    /// Backend answered 200 with `success: false`
    #[error("Upload failed: {0}")]
    Rejected(String),

    /// Non-200 status, transport failure, or malformed response
    #[error("Upload failed: {0}")]
    Backend(#[from] BackendError),
}

impl From<docgen_common::Error> for SubmissionError {
    fn from(err: docgen_common::Error) -> Self {
        match err {
            docgen_common::Error::InvalidInput(msg) => SubmissionError::InvalidInput(msg),
            other => SubmissionError::InvalidInput(other.to_string()),
        }
    }
}

/// Artifact fetch failed even though readiness may have been reported
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Backend has no artifact in that format for that id
    #[error("No {format} artifact available for {file_id}")]
    NotFound {
        file_id: String,
        format: ArtifactFormat,
    },

    #[error("Artifact fetch failed: {0}")]
    Backend(BackendError),
}

impl RetrievalError {
    pub(crate) fn from_backend(file_id: &str, format: ArtifactFormat, err: BackendError) -> Self {
        match err.status() {
            Some(404) => RetrievalError::NotFound {
                file_id: file_id.to_string(),
                format,
            },
            _ => RetrievalError::Backend(err),
        }
    }
}

/// Best-effort progress query failed; informational only
#[derive(Debug, Error)]
#[error("Could not get processing status: {0}")]
pub struct StatusProbeError(#[from] pub BackendError);

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Backend refused the request (422)
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// Backend unreachable or misbehaving (502)
    #[error("Backend error: {0}")]
    BadGateway(String),
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidInput(msg) => ApiError::BadRequest(msg),
            SubmissionError::Rejected(msg) => ApiError::Rejected(msg),
            SubmissionError::Backend(e) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        let message = err.to_string();
        match err {
            RetrievalError::NotFound { .. } => ApiError::NotFound(message),
            RetrievalError::Backend(_) => ApiError::BadGateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Rejected(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "REJECTED", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_404_maps_to_not_found() {
        let err = RetrievalError::from_backend(
            "abc",
            ArtifactFormat::Pdf,
            BackendError::Status {
                status: 404,
                message: "Not Found".into(),
            },
        );
        assert!(matches!(err, RetrievalError::NotFound { .. }));
        assert_eq!(err.to_string(), "No pdf artifact available for abc");
    }

    #[test]
    fn test_retrieval_other_errors_stay_backend() {
        let err = RetrievalError::from_backend(
            "abc",
            ArtifactFormat::Pdf,
            BackendError::Network("connection refused".into()),
        );
        assert!(matches!(err, RetrievalError::Backend(_)));
    }

    #[test]
    fn test_submission_error_status_codes() {
        let response = ApiError::from(SubmissionError::InvalidInput("empty".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(SubmissionError::Rejected("nope".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::from(SubmissionError::Backend(BackendError::Network(
            "refused".into(),
        )))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Rejected("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::BadGateway("x".into()), StatusCode::BAD_GATEWAY),
        ];

        for (error, status) in cases {
            let display = error.to_string();
            assert_eq!(error.into_response().status(), status, "{}", display);
        }
    }
}
