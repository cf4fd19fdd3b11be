//! docgen-ui library interface
//!
//! Browser-facing client for the documentation-generation backend. Exposes
//! the workflow and router for the binary and for integration testing.

pub mod api;
pub mod client;
pub mod error;
pub mod media;
pub mod session;
pub mod watcher;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use docgen_common::config::ClientConfig;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::client::{BackendClient, BackendError};
use crate::session::SessionStore;
use crate::watcher::ReadinessWatcher;
use crate::workflow::ClientWorkflow;

/// Application state shared across handlers
///
/// Owns the session store (through the workflow); handlers never reach a
/// global.
#[derive(Clone)]
pub struct AppState {
    /// Submission, status tracking and retrieval
    pub workflow: ClientWorkflow,
    /// Background pollers, present when auto polling is configured
    pub watcher: Option<ReadinessWatcher>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(workflow: ClientWorkflow, max_upload_bytes: usize) -> Self {
        Self {
            workflow,
            watcher: None,
            startup_time: Utc::now(),
            max_upload_bytes,
        }
    }

    pub fn with_watcher(mut self, watcher: ReadinessWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Build state from resolved configuration
    ///
    /// `shutdown` stops background pollers when the service exits.
    pub fn from_config(config: &ClientConfig, shutdown: CancellationToken) -> Result<Self, BackendError> {
        let client = BackendClient::new(config.backend_url.clone(), config.request_timeout)?;
        let workflow = ClientWorkflow::new(client, SessionStore::new());
        let state = Self::new(workflow.clone(), config.max_upload_bytes);

        Ok(match config.auto_poll_interval {
            Some(interval) => state.with_watcher(ReadinessWatcher::new(workflow, interval, shutdown)),
            None => state,
        })
    }

    /// Hand a fresh upload to the background poller, if enabled
    pub async fn watch_upload(&self, file_id: &str) {
        if let Some(watcher) = &self.watcher {
            watcher.watch(file_id).await;
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // JSON API routes
        .merge(api::upload_routes())
        .merge(api::preview_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
