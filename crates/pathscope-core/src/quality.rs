//! Data quality history.
//!
//! Append-only snapshots of data volume, produced by the datapipe's
//! analysis pass.

use crate::error::CoreResult;
use pathscope_db::queries::quality::QualityStatRow;
use pathscope_db::queries::{asset_groups, graph, quality as queries};
use pathscope_db::DbPool;
use serde::{Deserialize, Serialize};

/// One data quality snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityStat {
    pub id: i64,
    pub node_count: i64,
    pub edge_count: i64,
    pub selector_count: i64,
    pub created_at: String,
}

impl DataQualityStat {
    pub fn from_row(row: QualityStatRow) -> Self {
        Self {
            id: row.id,
            node_count: row.node_count,
            edge_count: row.edge_count,
            selector_count: row.selector_count,
            created_at: row.created_at,
        }
    }
}

/// Append a snapshot of the current data volume.
pub async fn record_snapshot(pool: &DbPool) -> CoreResult<DataQualityStat> {
    let node_count = graph::count_nodes(pool)?;
    let edge_count = graph::count_edges(pool)?;
    let selector_count = asset_groups::count_selectors(pool)?;
    let created_at = chrono::Utc::now().to_rfc3339();

    let id = queries::insert_stat(pool, node_count, edge_count, selector_count, &created_at)?;
    Ok(DataQualityStat {
        id,
        node_count,
        edge_count,
        selector_count,
        created_at,
    })
}

/// The full history, newest first.
pub async fn list_history(pool: &DbPool) -> CoreResult<Vec<DataQualityStat>> {
    let rows = queries::list_stats(pool)?;
    Ok(rows.into_iter().map(DataQualityStat::from_row).collect())
}

/// Delete the whole history. Returns the number of rows removed.
pub async fn clear_history(pool: &DbPool) -> CoreResult<usize> {
    Ok(queries::delete_all_stats(pool)?)
}
