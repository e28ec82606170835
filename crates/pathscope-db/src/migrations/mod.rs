//! Database migrations.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite_migration::{Migrations, M};

const SCHEMA: &str = include_str!("schema.sql");

/// Bring the database schema up to date.
pub fn run_migrations(pool: &DbPool) -> DbResult<()> {
    let migrations = Migrations::new(vec![M::up(SCHEMA)]);

    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| DbError::Migration(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_schema() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        pool.with_conn(|conn| {
            let tables: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN \
                 ('nodes','edges','asset_groups','asset_group_selectors','ingest_jobs',\
                  'ingest_tasks','data_quality_stats','datapipe_requests','datapipe_status')",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(tables, 9);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_migrations_seed_system_groups() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        pool.with_conn(|conn| {
            let system_groups: i64 = conn.query_row(
                "SELECT COUNT(*) FROM asset_groups WHERE system_group = 1",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(system_groups, 2);

            let status: String =
                conn.query_row("SELECT status FROM datapipe_status WHERE id = 1", [], |row| {
                    row.get(0)
                })?;
            assert_eq!(status, "idle");
            Ok(())
        })
        .unwrap();
    }
}
