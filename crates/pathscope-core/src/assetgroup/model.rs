//! Asset group domain models.

use pathscope_db::queries::asset_groups::{AssetGroupRow, SelectorRow};
use serde::{Deserialize, Serialize};

/// Tag of the distinguished high-value (tier zero) asset group.
pub const TIER_ZERO_TAG: &str = "admin_tier_0";

/// A named collection of graph nodes treated as a unit for tiering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetGroup {
    pub id: i64,
    pub name: String,
    pub tag: String,
    pub system_group: bool,
}

impl AssetGroup {
    pub fn from_row(row: AssetGroupRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            tag: row.tag,
            system_group: row.system_group,
        }
    }
}

/// A rule placing matching nodes into an asset group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetGroupSelector {
    pub id: i64,
    pub asset_group_id: i64,
    pub name: String,
    pub selector: String,
}

impl AssetGroupSelector {
    pub fn from_row(row: SelectorRow) -> Self {
        Self {
            id: row.id,
            asset_group_id: row.asset_group_id,
            name: row.name,
            selector: row.selector,
        }
    }
}

/// Read-only source of asset group identifiers.
pub trait AssetGroupIdSource {
    /// Every known asset group id.
    fn all_asset_group_ids(&self) -> &[i64];

    /// Id of the high-value tier group.
    fn tier_zero_asset_group_id(&self) -> i64;
}

/// Materialized id catalog, loaded once per flow.
#[derive(Debug, Clone)]
pub struct AssetGroupCatalog {
    pub all_ids: Vec<i64>,
    pub tier_zero_id: i64,
}

impl AssetGroupIdSource for AssetGroupCatalog {
    fn all_asset_group_ids(&self) -> &[i64] {
        &self.all_ids
    }

    fn tier_zero_asset_group_id(&self) -> i64 {
        self.tier_zero_id
    }
}
