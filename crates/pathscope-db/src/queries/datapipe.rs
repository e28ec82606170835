//! Datapipe status and request-flag queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::params;

/// Request kind: purge all collected graph data.
pub const REQUEST_DELETION: &str = "delete_collected_graph_data";

/// Request kind: recompute analysis artifacts.
pub const REQUEST_ANALYSIS: &str = "analysis";

pub fn set_request(
    pool: &DbPool,
    kind: &str,
    requested_by: &str,
    requested_at: &str,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO datapipe_requests (kind, requested_by, requested_at) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT(kind) DO UPDATE SET \
             requested_by = excluded.requested_by, requested_at = excluded.requested_at",
            params![kind, requested_by, requested_at],
        )?;
        Ok(())
    })
}

pub fn has_request(pool: &DbPool, kind: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM datapipe_requests WHERE kind = ?1",
            [kind],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    })
}

pub fn clear_request(pool: &DbPool, kind: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute("DELETE FROM datapipe_requests WHERE kind = ?1", [kind])?;
        Ok(())
    })
}

pub fn get_status(pool: &DbPool) -> DbResult<String> {
    pool.with_conn(|conn| {
        Ok(conn.query_row(
            "SELECT status FROM datapipe_status WHERE id = 1",
            [],
            |row| row.get(0),
        )?)
    })
}

pub fn set_status(pool: &DbPool, status: &str, updated_at: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE datapipe_status SET status = ?1, updated_at = ?2 WHERE id = 1",
            params![status, updated_at],
        )?;
        Ok(())
    })
}
