//! File ingest history routes.

use axum::extract::State;
use axum::Json;
use pathscope_core::ingest::model::IngestJob;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<IngestJob>>, ApiError> {
    let jobs = pathscope_core::ingest::list_history(&state.db)
        .await
        .map_err(|e| ApiError::internal("file-ingest", e.to_string()))?;

    Ok(Json(jobs))
}
