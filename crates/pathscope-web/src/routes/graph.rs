//! Graph data route handlers.

use axum::extract::State;
use axum::Json;
use pathscope_core::graph::model::GraphSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// The full collected graph, in the exchange format.
pub async fn get_graph(State(state): State<AppState>) -> Result<Json<GraphSnapshot>, ApiError> {
    let snapshot = pathscope_core::graph::load_snapshot(&state.db)
        .await
        .map_err(|e| ApiError::internal("graph", e.to_string()))?;

    Ok(Json(snapshot))
}
