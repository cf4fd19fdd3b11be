//! Upload → status → retrieval workflow
//!
//! `ClientWorkflow` ties the backend client to the session store:
//! - **Submission**: validate, upload, append a record on success
//! - **Status tracking**: binary existence check, best-effort progress
//! - **Retrieval**: eager PDF fetch for preview, deferred download links
//!
//! Every call is a single request/response exchange. A render pass checks
//! uploads one after another, oldest first.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use docgen_common::api::ProgressReport;
use docgen_common::{ArtifactFormat, DocLevel, DocType};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::client::{BackendClient, BackendError};
use crate::error::{RetrievalError, StatusProbeError, SubmissionError};
use crate::media::MediaUpload;
use crate::session::{ReadinessState, SessionStore, TrackedUpload, UploadRecord};

/// Deferred download link for one artifact format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub format: ArtifactFormat,
    pub label: &'static str,
    pub url: String,
}

/// Outcome of one poll of an upload
#[derive(Debug, Clone, Serialize)]
pub struct PollOutcome {
    pub file_id: String,
    pub state: ReadinessState,
    /// Progress report, only consulted while not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressReport>,
    /// Why the progress report is missing, if it was attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_note: Option<String>,
}

/// Inline PDF preview for a ready upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Upload not ready; nothing fetched
    Pending,
    /// PDF bytes exactly as served by the backend
    Available(Vec<u8>),
    /// Ready but the PDF fetch failed; the user should refresh
    Unavailable(String),
}

/// Everything the page needs to show one upload
#[derive(Debug, Clone)]
pub struct UploadView {
    pub upload: TrackedUpload,
    pub poll: PollOutcome,
    pub preview: Preview,
    pub links: Vec<DownloadLink>,
}

/// Client-side documentation workflow
#[derive(Debug, Clone)]
pub struct ClientWorkflow {
    client: BackendClient,
    session: SessionStore,
    /// Every file id the backend has reported ready, in the session or not
    ready: Arc<RwLock<HashSet<String>>>,
}

impl ClientWorkflow {
    pub fn new(client: BackendClient, session: SessionStore) -> Self {
        Self {
            client,
            session,
            ready: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    // ========================================
    // Submission
    // ========================================

    /// Upload a media file and record it in the session
    ///
    /// On any failure the session is left untouched. No automatic retry:
    /// submitting the same file again creates an independent record.
    pub async fn submit(
        &self,
        upload: MediaUpload,
        doc_type: DocType,
        doc_level: DocLevel,
    ) -> Result<UploadRecord, SubmissionError> {
        upload.validate()?;

        let filename = upload.filename.clone();
        tracing::info!(
            filename = %filename,
            size = upload.len(),
            doc_type = %doc_type,
            doc_level = %doc_level,
            "Submitting upload"
        );

        let response = match self.client.upload(upload, doc_type, doc_level).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "Upload failed");
                return Err(SubmissionError::Backend(e));
            }
        };

        let file_id = match response.accepted_file_id() {
            Ok(Some(id)) => id.to_string(),
            Ok(None) => {
                let reason = response.rejection_message();
                tracing::warn!(filename = %filename, reason = %reason, "Upload rejected by backend");
                return Err(SubmissionError::Rejected(reason));
            }
            Err(e) => return Err(BackendError::Malformed(e.to_string()).into()),
        };

        let record = UploadRecord::new(file_id, filename, doc_type, doc_level);
        let total = self.session.append(record.clone()).await;

        tracing::info!(
            file_id = %record.file_id(),
            filename = %record.filename(),
            session_uploads = total,
            "Upload accepted"
        );

        Ok(record)
    }

    /// Submit with document parameters given as wire strings
    ///
    /// Used for browser form input, which is only constrained by the page.
    pub async fn submit_raw(
        &self,
        upload: MediaUpload,
        doc_type: &str,
        doc_level: &str,
    ) -> Result<UploadRecord, SubmissionError> {
        let doc_type: DocType = doc_type.parse()?;
        let doc_level: DocLevel = doc_level.parse()?;
        self.submit(upload, doc_type, doc_level).await
    }

    // ========================================
    // Status tracking
    // ========================================

    /// Whether the artifacts for `file_id` exist
    ///
    /// Monotonic for any id: once ready, the backend is not asked again and
    /// the answer stays true.
    pub async fn is_ready(&self, file_id: &str) -> bool {
        if self.ready.read().await.contains(file_id) {
            return true;
        }

        if self.client.documentation_exists(file_id).await {
            self.ready.write().await.insert(file_id.to_string());
            if self.session.mark_ready(file_id).await {
                tracing::info!(file_id = %file_id, "Documentation ready");
            }
            true
        } else {
            self.session.mark_not_ready(file_id).await;
            false
        }
    }

    /// Processing progress, best-effort
    pub async fn get_progress(&self, file_id: &str) -> Result<ProgressReport, StatusProbeError> {
        let report = self.client.progress(file_id).await?;
        Ok(report)
    }

    /// One poll: existence check, then progress when not ready
    ///
    /// A failed progress query is logged and noted, never propagated.
    pub async fn poll(&self, file_id: &str) -> PollOutcome {
        if self.is_ready(file_id).await {
            return PollOutcome {
                file_id: file_id.to_string(),
                state: ReadinessState::Ready,
                progress: None,
                progress_note: None,
            };
        }

        let state = self
            .session
            .state(file_id)
            .await
            .unwrap_or(ReadinessState::NotReady);

        match self.get_progress(file_id).await {
            Ok(report) => PollOutcome {
                file_id: file_id.to_string(),
                state,
                progress: Some(report),
                progress_note: None,
            },
            Err(e) => {
                tracing::debug!(file_id = %file_id, error = %e, "Progress probe failed");
                PollOutcome {
                    file_id: file_id.to_string(),
                    state,
                    progress: None,
                    progress_note: Some(e.to_string()),
                }
            }
        }
    }

    // ========================================
    // Retrieval
    // ========================================

    /// Artifact bytes in the requested format
    ///
    /// Idempotent: no client state changes.
    pub async fn fetch_artifact(
        &self,
        file_id: &str,
        format: ArtifactFormat,
    ) -> Result<Vec<u8>, RetrievalError> {
        self.client
            .download(file_id, format)
            .await
            .map_err(|e| RetrievalError::from_backend(file_id, format, e))
    }

    /// Retrieval URL for `file_id` in `format`
    pub fn build_url(&self, file_id: &str, format: ArtifactFormat) -> String {
        self.client.build_url(file_id, format)
    }

    /// One link per artifact format; nothing is fetched
    pub fn download_links(&self, file_id: &str) -> Vec<DownloadLink> {
        ArtifactFormat::all_variants()
            .into_iter()
            .map(|format| DownloadLink {
                format,
                label: format.label(),
                url: self.build_url(file_id, format),
            })
            .collect()
    }

    /// PDF for inline preview
    ///
    /// A failure here after a positive readiness check is tolerated: the
    /// two calls are independent, so the caller shows a warning instead.
    pub async fn preview(&self, file_id: &str) -> Preview {
        match self.fetch_artifact(file_id, ArtifactFormat::Pdf).await {
            Ok(bytes) => Preview::Available(bytes),
            Err(e) => {
                tracing::warn!(file_id = %file_id, error = %e, "PDF preview unavailable despite readiness");
                Preview::Unavailable(e.to_string())
            }
        }
    }

    // ========================================
    // Render pass
    // ========================================

    /// Check every upload in the session, oldest first
    ///
    /// A file id the backend issued more than once is checked once per pass;
    /// each record keeps its own view.
    pub async fn render_pass(&self) -> Vec<UploadView> {
        let uploads = self.session.snapshot().await;
        let mut views = Vec::with_capacity(uploads.len());
        let mut checked: HashMap<String, (PollOutcome, Preview, Vec<DownloadLink>)> =
            HashMap::new();

        for (index, upload) in uploads.into_iter().enumerate() {
            let file_id = upload.record.file_id().to_string();

            let (poll, preview, links) = match checked.get(&file_id) {
                Some(result) => result.clone(),
                None => {
                    let poll = self.poll(&file_id).await;
                    let (preview, links) = if poll.state.is_ready() {
                        (self.preview(&file_id).await, self.download_links(&file_id))
                    } else {
                        (Preview::Pending, Vec::new())
                    };
                    let result = (poll, preview, links);
                    checked.insert(file_id, result.clone());
                    result
                }
            };

            let upload = self.session.get_at(index).await.unwrap_or(upload);
            views.push(UploadView {
                upload,
                poll,
                preview,
                links,
            });
        }

        views
    }
}
