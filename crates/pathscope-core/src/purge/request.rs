//! Clear-database request construction.

use super::model::Selection;
use crate::assetgroup::model::AssetGroupIdSource;
use serde::{Deserialize, Serialize};

/// Wire request accepted by the deletion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearDatabaseRequest {
    pub delete_collected_graph_data: bool,
    pub delete_data_quality_history: bool,
    pub delete_file_ingest_history: bool,
    pub delete_asset_group_selectors: Vec<i64>,
}

/// Build the request for the current selection.
///
/// "All asset group selectors" expands to every known id; otherwise
/// "custom High Value selectors" contributes the single tier-zero id. The
/// id list is de-duplicated preserving first-seen order.
pub fn build_clear_request(
    selection: &Selection,
    ids: &impl AssetGroupIdSource,
) -> ClearDatabaseRequest {
    let mut asset_group_ids: Vec<i64> = Vec::new();
    if selection.all_asset_group_selectors {
        asset_group_ids.extend_from_slice(ids.all_asset_group_ids());
    } else if selection.custom_high_value_selectors {
        asset_group_ids.push(ids.tier_zero_asset_group_id());
    }

    ClearDatabaseRequest {
        delete_collected_graph_data: selection.collected_graph_data,
        delete_data_quality_history: selection.data_quality_history,
        delete_file_ingest_history: selection.file_ingest_history,
        delete_asset_group_selectors: dedupe(asset_group_ids),
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
fn dedupe(ids: Vec<i64>) -> Vec<i64> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
