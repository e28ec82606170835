//! Asset group and selector queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

#[derive(Debug, Clone)]
pub struct AssetGroupRow {
    pub id: i64,
    pub name: String,
    pub tag: String,
    pub system_group: bool,
}

#[derive(Debug, Clone)]
pub struct SelectorRow {
    pub id: i64,
    pub asset_group_id: i64,
    pub name: String,
    pub selector: String,
}

pub fn list_asset_groups(pool: &DbPool) -> DbResult<Vec<AssetGroupRow>> {
    pool.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT id, name, tag, system_group FROM asset_groups ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(AssetGroupRow {
                id: row.get(0)?,
                name: row.get(1)?,
                tag: row.get(2)?,
                system_group: row.get(3)?,
            })
        })?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row?);
        }
        Ok(groups)
    })
}

pub fn list_asset_group_ids(pool: &DbPool) -> DbResult<Vec<i64>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id FROM asset_groups ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    })
}

pub fn get_asset_group(pool: &DbPool, id: i64) -> DbResult<Option<AssetGroupRow>> {
    pool.with_conn(|conn| {
        Ok(conn
            .query_row(
                "SELECT id, name, tag, system_group FROM asset_groups WHERE id = ?1",
                [id],
                |row| {
                    Ok(AssetGroupRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        tag: row.get(2)?,
                        system_group: row.get(3)?,
                    })
                },
            )
            .optional()?)
    })
}

pub fn get_asset_group_id_by_tag(pool: &DbPool, tag: &str) -> DbResult<Option<i64>> {
    pool.with_conn(|conn| {
        Ok(conn
            .query_row("SELECT id FROM asset_groups WHERE tag = ?1", [tag], |row| {
                row.get(0)
            })
            .optional()?)
    })
}

/// Insert a selector and return its id.
pub fn insert_selector(
    pool: &DbPool,
    asset_group_id: i64,
    name: &str,
    selector: &str,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO asset_group_selectors (asset_group_id, name, selector) \
             VALUES (?1, ?2, ?3)",
            params![asset_group_id, name, selector],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn list_selectors(pool: &DbPool, asset_group_id: i64) -> DbResult<Vec<SelectorRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, asset_group_id, name, selector FROM asset_group_selectors \
             WHERE asset_group_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([asset_group_id], |row| {
            Ok(SelectorRow {
                id: row.get(0)?,
                asset_group_id: row.get(1)?,
                name: row.get(2)?,
                selector: row.get(3)?,
            })
        })?;

        let mut selectors = Vec::new();
        for row in rows {
            selectors.push(row?);
        }
        Ok(selectors)
    })
}

pub fn count_selectors(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM asset_group_selectors", [], |row| {
            row.get(0)
        })?)
    })
}

/// Delete the selectors of the given groups. Returns the number removed.
pub fn delete_selectors_for_groups(pool: &DbPool, group_ids: &[i64]) -> DbResult<usize> {
    if group_ids.is_empty() {
        return Ok(0);
    }

    pool.with_conn(|conn| {
        let placeholders = vec!["?"; group_ids.len()].join(", ");
        let sql = format!(
            "DELETE FROM asset_group_selectors WHERE asset_group_id IN ({})",
            placeholders
        );
        Ok(conn.execute(&sql, rusqlite::params_from_iter(group_ids.iter()))?)
    })
}
