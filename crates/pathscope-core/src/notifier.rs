//! Web server notifier for real-time updates.
//!
//! The datapipe and the CLI post events here; the web server rebroadcasts
//! them to connected WebSocket clients. Delivery is fire-and-forget: when
//! no server is listening the failure is logged at debug level and ignored.

use crate::datapipe::DatapipeStatus;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct WebNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl WebNotifier {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Announce a datapipe status change.
    pub async fn notify_datapipe_status(&self, status: DatapipeStatus) {
        self.post(serde_json::json!({
            "type": "DatapipeStatus",
            "data": { "status": status.as_str() }
        }))
        .await;
    }

    /// Announce that a file was queued for ingest.
    pub async fn notify_file_accepted(&self, file_name: &str) {
        self.post(serde_json::json!({
            "type": "FileAccepted",
            "data": { "file_name": file_name }
        }))
        .await;
    }

    async fn post(&self, payload: serde_json::Value) {
        let url = format!("{}/internal/notify", self.base_url);
        match self.client.post(&url).json(&payload).send().await {
            Ok(response) if !response.status().is_success() => {
                debug!(status = %response.status(), url = %url, "notification rejected");
            }
            Ok(_) => {}
            Err(e) => {
                // Expected whenever no server is running.
                debug!(error = %e, url = %url, "failed to send notification");
            }
        }
    }
}
