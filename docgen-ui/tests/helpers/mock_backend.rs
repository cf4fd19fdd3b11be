//! Mock documentation backend
//!
//! Real HTTP server on an ephemeral localhost port implementing the four
//! backend endpoints with scripted responses and request counters.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

/// Fields received by `POST /upload`
#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub doc_type: Option<String>,
    pub doc_level: Option<String>,
}

/// Scripted behaviour and observations
#[derive(Debug, Default)]
pub struct MockState {
    /// Responses for successive uploads; when empty a fresh id is accepted
    pub upload_responses: VecDeque<(u16, Value)>,
    pub uploads: Vec<RecordedUpload>,

    /// Statuses for successive existence checks; when empty `documentation_default`
    pub documentation_statuses: VecDeque<u16>,
    pub documentation_default: u16,
    pub documentation_checks: usize,

    /// Response for `GET /status/{id}`
    pub status_response: Option<(u16, Value)>,
    pub status_checks: usize,

    /// Artifacts keyed by (file_id, format)
    pub artifacts: HashMap<(String, String), Vec<u8>>,
    pub downloads: usize,
}

/// Handle to a running mock backend
#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Start on 127.0.0.1 with an OS-assigned port
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            documentation_default: 404,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/upload", post(upload))
            .route("/documentation/:file_id", get(documentation))
            .route("/status/:file_id", get(status))
            .route("/download/:file_id", get(download))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind mock backend");
        let addr = listener.local_addr().expect("Should have local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn push_upload_response(&self, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .upload_responses
            .push_back((status, body));
    }

    pub fn accept_next_upload_as(&self, file_id: &str) {
        self.push_upload_response(200, json!({"success": true, "file_id": file_id}));
    }

    pub fn queue_documentation_statuses(&self, statuses: &[u16]) {
        self.state
            .lock()
            .unwrap()
            .documentation_statuses
            .extend(statuses.iter().copied());
    }

    pub fn set_documentation_default(&self, status: u16) {
        self.state.lock().unwrap().documentation_default = status;
    }

    pub fn set_status_response(&self, status: u16, body: Value) {
        self.state.lock().unwrap().status_response = Some((status, body));
    }

    pub fn put_artifact(&self, file_id: &str, format: &str, bytes: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .artifacts
            .insert((file_id.to_string(), format.to_string()), bytes.to_vec());
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn documentation_checks(&self) -> usize {
        self.state.lock().unwrap().documentation_checks
    }

    pub fn status_checks(&self) -> usize {
        self.state.lock().unwrap().status_checks
    }

    pub fn downloads(&self) -> usize {
        self.state.lock().unwrap().downloads
    }
}

type Shared = Arc<Mutex<MockState>>;

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let mut recorded = RecordedUpload::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                recorded.filename = field.file_name().unwrap_or_default().to_string();
                recorded.content_type = field.content_type().map(str::to_string);
                recorded.bytes = field.bytes().await.unwrap_or_default().to_vec();
            }
            "doc_type" => recorded.doc_type = field.text().await.ok(),
            "doc_level" => recorded.doc_level = field.text().await.ok(),
            _ => {}
        }
    }

    let mut state = state.lock().unwrap();
    state.uploads.push(recorded);

    let (code, body) = state.upload_responses.pop_front().unwrap_or_else(|| {
        (
            200,
            json!({"success": true, "file_id": Uuid::new_v4().to_string()}),
        )
    });

    (status_code(code), Json(body)).into_response()
}

async fn documentation(State(state): State<Shared>, Path(file_id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.documentation_checks += 1;
    let code = state
        .documentation_statuses
        .pop_front()
        .unwrap_or(state.documentation_default);

    (status_code(code), Json(json!({"file_id": file_id}))).into_response()
}

async fn status(State(state): State<Shared>, Path(_file_id): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    state.status_checks += 1;

    match state.status_response.clone() {
        Some((code, body)) => (status_code(code), Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response(),
    }
}

async fn download(
    State(state): State<Shared>,
    Path(file_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.downloads += 1;

    let format = query.get("format").cloned().unwrap_or_else(|| "pdf".to_string());
    match state.artifacts.get(&(file_id, format)) {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Documentation not found"}))).into_response(),
    }
}
