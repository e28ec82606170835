//! Collected graph data queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::params;

#[derive(Debug, Clone)]
pub struct NodeRow {
    pub object_id: String,
    pub kind: String,
    pub name: String,
    pub properties: String,
}

#[derive(Debug, Clone)]
pub struct EdgeRow {
    pub source_object_id: String,
    pub target_object_id: String,
    pub kind: String,
}

/// Insert a node, replacing any previous collection of the same object.
pub fn upsert_node(pool: &DbPool, row: &NodeRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO nodes (object_id, kind, name, properties) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(object_id) DO UPDATE SET \
             kind = excluded.kind, name = excluded.name, properties = excluded.properties",
            params![row.object_id, row.kind, row.name, row.properties],
        )?;
        Ok(())
    })
}

/// Insert an edge. Re-collected edges are ignored.
pub fn insert_edge(pool: &DbPool, row: &EdgeRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT OR IGNORE INTO edges (source_object_id, target_object_id, kind) \
             VALUES (?1, ?2, ?3)",
            params![row.source_object_id, row.target_object_id, row.kind],
        )?;
        Ok(())
    })
}

pub fn list_nodes(pool: &DbPool) -> DbResult<Vec<NodeRow>> {
    pool.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT object_id, kind, name, properties FROM nodes ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(NodeRow {
                object_id: row.get(0)?,
                kind: row.get(1)?,
                name: row.get(2)?,
                properties: row.get(3)?,
            })
        })?;

        let mut nodes = Vec::new();
        for row in rows {
            nodes.push(row?);
        }
        Ok(nodes)
    })
}

pub fn list_edges(pool: &DbPool) -> DbResult<Vec<EdgeRow>> {
    pool.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT source_object_id, target_object_id, kind FROM edges ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(EdgeRow {
                source_object_id: row.get(0)?,
                target_object_id: row.get(1)?,
                kind: row.get(2)?,
            })
        })?;

        let mut edges = Vec::new();
        for row in rows {
            edges.push(row?);
        }
        Ok(edges)
    })
}

pub fn count_nodes(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?))
}

pub fn count_edges(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?))
}

/// Delete every node. Returns the number removed.
pub fn delete_all_nodes(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM nodes", [])?))
}

/// Delete every edge. Returns the number removed.
pub fn delete_all_edges(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM edges", [])?))
}
