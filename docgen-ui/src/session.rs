//! In-memory upload session
//!
//! Append-only list of uploads made during this process's lifetime, each
//! paired with its readiness state. Ordering is insertion order (oldest
//! first). Nothing is persisted: history is lost when the service stops.
//!
//! Readiness state machine per upload:
//! `Submitted → NotReady ⟲ → Ready`. `Ready` is terminal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use docgen_common::{DocLevel, DocType};
use serde::Serialize;
use tokio::sync::RwLock;

/// One user-initiated submission
///
/// Fields are read-only after construction; `file_id` always comes from the
/// backend's upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRecord {
    file_id: String,
    filename: String,
    doc_type: DocType,
    doc_level: DocLevel,
    submitted_at: DateTime<Utc>,
}

impl UploadRecord {
    pub fn new(
        file_id: impl Into<String>,
        filename: impl Into<String>,
        doc_type: DocType,
        doc_level: DocLevel,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            filename: filename.into(),
            doc_type,
            doc_level,
            submitted_at: Utc::now(),
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn doc_level(&self) -> DocLevel {
        self.doc_level
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// View-level readiness of an upload's artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    /// Accepted by the backend, never polled
    Submitted,
    /// Polled at least once, artifacts not available yet
    NotReady,
    /// Artifacts available; never reverts
    Ready,
}

impl ReadinessState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessState::Ready)
    }
}

/// An upload plus what the client has learned about it
#[derive(Debug, Clone, Serialize)]
pub struct TrackedUpload {
    pub record: UploadRecord,
    pub state: ReadinessState,
    /// Number of existence checks issued for this upload
    pub checks: u32,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Session-scoped upload list shared by request handlers
///
/// The only write surfaces are [`append`](Self::append) and the
/// forward-only readiness transitions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    uploads: Arc<RwLock<Vec<TrackedUpload>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new upload at the end of the list, returning the new length
    pub async fn append(&self, record: UploadRecord) -> usize {
        let mut uploads = self.uploads.write().await;

        if uploads.iter().any(|u| u.record.file_id == record.file_id) {
            tracing::warn!(
                file_id = %record.file_id,
                "Backend reissued an existing file_id; keeping both records"
            );
        }

        uploads.push(TrackedUpload {
            record,
            state: ReadinessState::Submitted,
            checks: 0,
            last_checked_at: None,
        });
        uploads.len()
    }

    pub async fn len(&self) -> usize {
        self.uploads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.uploads.read().await.is_empty()
    }

    /// Copy of every tracked upload, oldest first
    pub async fn snapshot(&self) -> Vec<TrackedUpload> {
        self.uploads.read().await.clone()
    }

    /// First upload carrying `file_id`
    pub async fn get(&self, file_id: &str) -> Option<TrackedUpload> {
        self.uploads
            .read()
            .await
            .iter()
            .find(|u| u.record.file_id == file_id)
            .cloned()
    }

    /// Upload at `index` in submission order
    ///
    /// Distinguishes records when the backend reissues a `file_id`.
    pub async fn get_at(&self, index: usize) -> Option<TrackedUpload> {
        self.uploads.read().await.get(index).cloned()
    }

    pub async fn state(&self, file_id: &str) -> Option<ReadinessState> {
        self.get(file_id).await.map(|u| u.state)
    }

    /// File ids that have not reached `Ready`
    pub async fn outstanding(&self) -> Vec<String> {
        self.uploads
            .read()
            .await
            .iter()
            .filter(|u| !u.state.is_ready())
            .map(|u| u.record.file_id.clone())
            .collect()
    }

    /// Record a positive existence check
    ///
    /// Returns true when this call moved the upload into `Ready`.
    pub async fn mark_ready(&self, file_id: &str) -> bool {
        self.record_check(file_id, ReadinessState::Ready).await
    }

    /// Record a negative existence check
    ///
    /// Has no effect on state once the upload is `Ready`.
    pub async fn mark_not_ready(&self, file_id: &str) {
        self.record_check(file_id, ReadinessState::NotReady).await;
    }

    async fn record_check(&self, file_id: &str, observed: ReadinessState) -> bool {
        let mut uploads = self.uploads.write().await;
        let mut transitioned = false;

        for upload in uploads.iter_mut().filter(|u| u.record.file_id == file_id) {
            upload.checks = upload.checks.saturating_add(1);
            upload.last_checked_at = Some(Utc::now());

            if upload.state.is_ready() {
                continue;
            }
            if upload.state != observed {
                transitioned |= observed.is_ready();
                upload.state = observed;
            }
        }

        transitioned
    }
}
