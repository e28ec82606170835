//! Asset group route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pathscope_core::assetgroup::model::{AssetGroup, AssetGroupSelector};
use pathscope_core::CoreError;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_asset_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssetGroup>>, ApiError> {
    let groups = pathscope_core::assetgroup::list_asset_groups(&state.db)
        .await
        .map_err(|e| ApiError::internal("asset-groups", e.to_string()))?;

    Ok(Json(groups))
}

pub async fn list_selectors(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AssetGroupSelector>>, ApiError> {
    let selectors = pathscope_core::assetgroup::list_selectors(&state.db, id)
        .await
        .map_err(|e| ApiError::internal("asset-groups", e.to_string()))?;

    Ok(Json(selectors))
}

#[derive(Deserialize)]
pub struct AddSelectorRequest {
    pub name: String,
    pub selector: String,
}

pub async fn add_selector(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddSelectorRequest>,
) -> Result<(StatusCode, Json<AssetGroupSelector>), ApiError> {
    let selector = pathscope_core::assetgroup::add_selector(&state.db, id, &req.name, &req.selector)
        .await
        .map_err(|e| match e {
            CoreError::AssetGroupNotFound(_) => ApiError::not_found("asset-groups", e.to_string()),
            CoreError::Validation(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "asset-groups", e.to_string())
            }
            _ => ApiError::internal("asset-groups", e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(selector)))
}
