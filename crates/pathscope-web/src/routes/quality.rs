//! Data quality history routes.

use axum::extract::State;
use axum::Json;
use pathscope_core::quality::DataQualityStat;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<DataQualityStat>>, ApiError> {
    let stats = pathscope_core::quality::list_history(&state.db)
        .await
        .map_err(|e| ApiError::internal("data-quality", e.to_string()))?;

    Ok(Json(stats))
}
