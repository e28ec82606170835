//! Application state.

use pathscope_db::DbPool;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// WebSocket message types.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    DatapipeStatus { status: String },
    FileAccepted { file_name: String },
    DatabaseCleared,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tx: broadcast::Sender<WebSocketMessage>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(db: DbPool, admin_token: Option<String>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            db,
            tx,
            admin_token,
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }
}
