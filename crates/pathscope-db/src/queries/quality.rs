//! Data quality history queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::params;

#[derive(Debug, Clone)]
pub struct QualityStatRow {
    pub id: i64,
    pub node_count: i64,
    pub edge_count: i64,
    pub selector_count: i64,
    pub created_at: String,
}

/// Append a snapshot row and return its id.
pub fn insert_stat(
    pool: &DbPool,
    node_count: i64,
    edge_count: i64,
    selector_count: i64,
    created_at: &str,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO data_quality_stats (node_count, edge_count, selector_count, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![node_count, edge_count, selector_count, created_at],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Full history, newest first.
pub fn list_stats(pool: &DbPool) -> DbResult<Vec<QualityStatRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, node_count, edge_count, selector_count, created_at \
             FROM data_quality_stats ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(QualityStatRow {
                id: row.get(0)?,
                node_count: row.get(1)?,
                edge_count: row.get(2)?,
                selector_count: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    })
}

/// Delete the whole history. Returns the number of rows removed.
pub fn delete_all_stats(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM data_quality_stats", [])?))
}
