//! Background readiness polling
//!
//! Optional alternative to polling on page loads: one lightweight timer per
//! outstanding upload, stopped as soon as that upload is ready or the service
//! shuts down. Enabled by `auto_poll_interval_secs` in the config file.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::workflow::ClientWorkflow;

/// Per-upload readiness pollers
#[derive(Clone)]
pub struct ReadinessWatcher {
    workflow: ClientWorkflow,
    interval: Duration,
    shutdown: CancellationToken,
    /// Uploads with a running poller; each entry is removed by its own poller
    active: Arc<RwLock<HashSet<String>>>,
}

impl ReadinessWatcher {
    /// `shutdown` cancels every poller started by this watcher
    pub fn new(workflow: ClientWorkflow, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            workflow,
            interval,
            shutdown,
            active: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Start polling `file_id` in the background
    ///
    /// Returns false if that upload is already being watched.
    pub async fn watch(&self, file_id: &str) -> bool {
        if !self.active.write().await.insert(file_id.to_string()) {
            return false;
        }
        let token = self.shutdown.child_token();

        let workflow = self.workflow.clone();
        let active = Arc::clone(&self.active);
        let interval = self.interval;
        let file_id = file_id.to_string();

        tokio::spawn(async move {
            tracing::debug!(file_id = %file_id, ?interval, "Readiness poller started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(file_id = %file_id, "Readiness poller cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }

                if workflow.is_ready(&file_id).await {
                    tracing::info!(file_id = %file_id, "Readiness poller finished: documentation ready");
                    break;
                }
            }

            active.write().await.remove(&file_id);
        });

        true
    }

    /// Number of uploads currently being polled
    pub async fn active_count(&self) -> usize {
        self.active.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BackendClient;
    use crate::session::SessionStore;

    fn watcher(interval: Duration, shutdown: CancellationToken) -> ReadinessWatcher {
        // Nothing listens on port 9; every check reports not ready
        let client = BackendClient::new("http://127.0.0.1:9", None).unwrap();
        let workflow = ClientWorkflow::new(client, SessionStore::new());
        ReadinessWatcher::new(workflow, interval, shutdown)
    }

    async fn wait_until_idle(watcher: &ReadinessWatcher) {
        for _ in 0..50 {
            if watcher.active_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn test_duplicate_watch_is_rejected() {
        let shutdown = CancellationToken::new();
        let watcher = watcher(Duration::from_secs(60), shutdown.clone());

        assert!(watcher.watch("abc").await);
        assert!(!watcher.watch("abc").await);
        assert_eq!(watcher.active_count().await, 1);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_shutdown_stops_all_pollers() {
        let shutdown = CancellationToken::new();
        let watcher = watcher(Duration::from_secs(60), shutdown.clone());
        watcher.watch("a").await;
        watcher.watch("b").await;
        assert_eq!(watcher.active_count().await, 2);

        shutdown.cancel();
        wait_until_idle(&watcher).await;
        assert_eq!(watcher.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_upload_can_be_rewatched_after_poller_exits() {
        let shutdown = CancellationToken::new();
        let watcher = watcher(Duration::from_secs(60), shutdown.clone());
        watcher.watch("abc").await;

        shutdown.cancel();
        wait_until_idle(&watcher).await;

        // Child tokens of a cancelled parent start cancelled; the poller exits at once
        assert!(watcher.watch("abc").await);
        wait_until_idle(&watcher).await;
        assert_eq!(watcher.active_count().await, 0);
    }
}
