//! Caller identity routes.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth;
use crate::state::AppState;

/// Report the permissions granted to the bearer of this request.
pub async fn get_self(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let permissions = auth::permissions_for(&headers, state.admin_token.as_deref());
    Json(serde_json::json!({ "permissions": permissions }))
}
