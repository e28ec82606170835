//! Database management route handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use pathscope_core::purge::request::ClearDatabaseRequest;
use pathscope_core::purge::ClearDatabaseSummary;

use crate::auth::{has_permission, Permission};
use crate::error::ApiError;
use crate::state::{AppState, WebSocketMessage};

/// Selectively delete stored data. Requires the `wipe_db` permission.
pub async fn clear_database(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ClearDatabaseRequest>,
) -> Result<Json<ClearDatabaseSummary>, ApiError> {
    if !has_permission(&headers, state.admin_token.as_deref(), Permission::WipeDb) {
        return Err(ApiError::forbidden(
            "clear-database",
            "not authorized to manage the database",
        ));
    }

    let summary = pathscope_core::purge::run_clear_database(&state.db, &request)
        .await
        .map_err(|e| ApiError::internal("clear-database", e.to_string()))?;

    state.broadcast(WebSocketMessage::DatabaseCleared);

    Ok(Json(summary))
}

pub async fn datapipe_status(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = pathscope_core::datapipe::current_status(&state.db)
        .await
        .map_err(|e| ApiError::internal("datapipe", e.to_string()))?;

    Ok(Json(serde_json::json!({ "status": status.as_str() })))
}
