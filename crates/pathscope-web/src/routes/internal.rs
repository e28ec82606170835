//! Internal notification ingress.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::state::{AppState, WebSocketMessage};

/// Accept an event from a sibling process and fan it out to WebSocket
/// clients.
pub async fn notify(State(state): State<AppState>, Json(msg): Json<WebSocketMessage>) -> StatusCode {
    debug!(
        ?msg,
        receivers = state.tx.receiver_count(),
        "rebroadcasting internal notification"
    );
    state.broadcast(msg);
    StatusCode::OK
}
