//! Backend response types
//!
//! One schema per backend endpoint that returns JSON:
//! - `POST /upload` → [`UploadResponse`]
//! - `GET /status/{file_id}` → [`ProgressReport`]
//! - any non-success response → [`BackendErrorBody`] (best-effort)
//!
//! `GET /documentation/{file_id}` and `GET /download/{file_id}` carry no JSON
//! contract: the first is judged by status code alone, the second returns raw
//! artifact bytes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Message reported when the backend gives no reason for a failure
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error";

// ========================================
// Upload
// ========================================

/// `POST /upload` response body
///
/// # Examples
///
/// ```
/// use docgen_common::api::UploadResponse;
///
/// let body = r#"{"success": true, "file_id": "abc123"}"#;
/// let response: UploadResponse = serde_json::from_str(body).unwrap();
/// assert_eq!(response.accepted_file_id().unwrap(), Some("abc123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadResponse {
    /// Whether the backend accepted the upload
    pub success: bool,

    /// Backend-assigned identifier, present when `success` is true
    #[serde(default)]
    pub file_id: Option<String>,

    /// Optional human-readable message (reason for rejection)
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// Check the body is internally consistent
    ///
    /// A successful response must carry a non-blank `file_id`.
    pub fn validate(&self) -> Result<()> {
        if self.success {
            match self.file_id.as_deref() {
                Some(id) if !id.trim().is_empty() => Ok(()),
                _ => Err(Error::Schema(
                    "upload reported success without a file_id".to_string(),
                )),
            }
        } else {
            Ok(())
        }
    }

    /// File id of an accepted upload
    ///
    /// Returns `Ok(None)` for a rejected upload and an error when the body
    /// violates the schema.
    pub fn accepted_file_id(&self) -> Result<Option<&str>> {
        self.validate()?;
        if self.success {
            Ok(self.file_id.as_deref())
        } else {
            Ok(None)
        }
    }

    /// Rejection reason, defaulting to a generic message
    pub fn rejection_message(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string()
    }
}

// ========================================
// Progress
// ========================================

/// `GET /status/{file_id}` response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgressReport {
    /// Backend processing state (e.g. "processing", "failed")
    pub status: String,

    /// Percentage complete, 0 to 100
    pub progress: i64,

    /// Name of the pipeline stage currently running
    #[serde(default)]
    pub current_stage: String,

    /// Processing error reported by the backend, if any
    #[serde(default)]
    pub error: Option<String>,
}

impl ProgressReport {
    /// Check `progress` lies within 0..=100
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.progress) {
            return Err(Error::Schema(format!(
                "progress {} outside 0..=100",
                self.progress
            )));
        }
        Ok(())
    }

    /// Whether the backend reported a processing error
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

// ========================================
// Errors
// ========================================

/// Error body returned with non-success status codes
///
/// Backends differ in where they put the reason: `message` for this API's
/// own errors, `detail` for framework-generated ones (string or structured).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub detail: Option<Value>,
}

impl BackendErrorBody {
    /// Parse an error body, tolerating non-JSON payloads
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Best available reason, defaulting to a generic message
    pub fn reason(&self) -> String {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }
        match &self.detail {
            Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
            Some(Value::Null) | None => DEFAULT_ERROR_MESSAGE.to_string(),
            Some(Value::String(_)) => DEFAULT_ERROR_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        }
    }
}
