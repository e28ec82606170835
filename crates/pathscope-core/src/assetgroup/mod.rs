//! Asset group management.

pub mod model;

use crate::error::{CoreError, CoreResult};
use model::{AssetGroup, AssetGroupCatalog, AssetGroupSelector, TIER_ZERO_TAG};
use pathscope_db::queries::asset_groups as queries;
use pathscope_db::DbPool;

/// List every asset group.
pub async fn list_asset_groups(pool: &DbPool) -> CoreResult<Vec<AssetGroup>> {
    let rows = queries::list_asset_groups(pool)?;
    Ok(rows.into_iter().map(AssetGroup::from_row).collect())
}

/// List the selectors of one group.
pub async fn list_selectors(pool: &DbPool, asset_group_id: i64) -> CoreResult<Vec<AssetGroupSelector>> {
    let rows = queries::list_selectors(pool, asset_group_id)?;
    Ok(rows.into_iter().map(AssetGroupSelector::from_row).collect())
}

/// Add a selector to a group.
pub async fn add_selector(
    pool: &DbPool,
    asset_group_id: i64,
    name: &str,
    selector: &str,
) -> CoreResult<AssetGroupSelector> {
    if name.trim().is_empty() || selector.trim().is_empty() {
        return Err(CoreError::validation("selector name and value are required"));
    }
    if queries::get_asset_group(pool, asset_group_id)?.is_none() {
        return Err(CoreError::AssetGroupNotFound(asset_group_id.to_string()));
    }

    let id = queries::insert_selector(pool, asset_group_id, name, selector)?;
    Ok(AssetGroupSelector {
        id,
        asset_group_id,
        name: name.to_string(),
        selector: selector.to_string(),
    })
}

/// Load the id catalog injected into the purge flow.
pub async fn load_catalog(pool: &DbPool) -> CoreResult<AssetGroupCatalog> {
    let all_ids = queries::list_asset_group_ids(pool)?;
    let tier_zero_id = queries::get_asset_group_id_by_tag(pool, TIER_ZERO_TAG)?
        .ok_or_else(|| CoreError::AssetGroupNotFound(TIER_ZERO_TAG.to_string()))?;

    Ok(AssetGroupCatalog {
        all_ids,
        tier_zero_id,
    })
}

/// Delete the selectors of the given groups. Returns the number removed.
pub async fn delete_selectors_for_groups(pool: &DbPool, group_ids: &[i64]) -> CoreResult<usize> {
    Ok(queries::delete_selectors_for_groups(pool, group_ids)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_catalog_from_seeded_groups() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        let catalog = load_catalog(&pool).await.unwrap();
        assert_eq!(catalog.all_ids.len(), 2);
        assert!(catalog.all_ids.contains(&catalog.tier_zero_id));

        let groups = list_asset_groups(&pool).await.unwrap();
        let tier_zero = groups.iter().find(|g| g.tag == TIER_ZERO_TAG).unwrap();
        assert_eq!(tier_zero.id, catalog.tier_zero_id);
        assert!(tier_zero.system_group);
    }

    #[tokio::test]
    async fn test_add_and_delete_selectors() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        let catalog = load_catalog(&pool).await.unwrap();

        add_selector(&pool, catalog.tier_zero_id, "DA group", "S-1-5-21-999-512")
            .await
            .unwrap();
        add_selector(&pool, catalog.tier_zero_id, "EA group", "S-1-5-21-999-519")
            .await
            .unwrap();

        let selectors = list_selectors(&pool, catalog.tier_zero_id).await.unwrap();
        assert_eq!(selectors.len(), 2);

        let deleted = delete_selectors_for_groups(&pool, &[catalog.tier_zero_id])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(list_selectors(&pool, catalog.tier_zero_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_add_selector_to_unknown_group() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        let result = add_selector(&pool, 404, "nope", "S-1-5-21-1-1").await;
        assert!(matches!(result, Err(CoreError::AssetGroupNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_selector_rejects_blank_input() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        let catalog = load_catalog(&pool).await.unwrap();

        let result = add_selector(&pool, catalog.tier_zero_id, "  ", "S-1-5-21-1-1").await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
