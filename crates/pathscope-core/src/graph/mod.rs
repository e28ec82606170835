//! Collected graph data.

pub mod exchange;
pub mod model;

use crate::error::CoreResult;
use model::{GraphEdge, GraphNode, GraphSnapshot};
use pathscope_db::queries::graph as queries;
use pathscope_db::DbPool;

/// Node and edge counts.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct GraphCounts {
    pub nodes: i64,
    pub edges: i64,
}

/// Load the full collected graph.
pub async fn load_snapshot(pool: &DbPool) -> CoreResult<GraphSnapshot> {
    let nodes = queries::list_nodes(pool)?
        .into_iter()
        .map(|row| {
            let properties =
                serde_json::from_str(&row.properties).unwrap_or(serde_json::Value::Null);
            GraphNode {
                object_id: row.object_id,
                kind: row.kind,
                name: row.name,
                properties,
            }
        })
        .collect();

    let edges = queries::list_edges(pool)?
        .into_iter()
        .map(|row| GraphEdge {
            source: row.source_object_id,
            target: row.target_object_id,
            kind: row.kind,
        })
        .collect();

    Ok(GraphSnapshot { nodes, edges })
}

/// Write a snapshot into the store. Nodes upsert by object id; edges
/// already present are left alone.
pub async fn store_snapshot(pool: &DbPool, snapshot: &GraphSnapshot) -> CoreResult<()> {
    for node in &snapshot.nodes {
        queries::upsert_node(
            pool,
            &queries::NodeRow {
                object_id: node.object_id.clone(),
                kind: node.kind.clone(),
                name: node.name.clone(),
                properties: serde_json::to_string(&node.properties)?,
            },
        )?;
    }

    for edge in &snapshot.edges {
        queries::insert_edge(
            pool,
            &queries::EdgeRow {
                source_object_id: edge.source.clone(),
                target_object_id: edge.target.clone(),
                kind: edge.kind.clone(),
            },
        )?;
    }

    Ok(())
}

/// Current node and edge counts.
pub async fn counts(pool: &DbPool) -> CoreResult<GraphCounts> {
    Ok(GraphCounts {
        nodes: queries::count_nodes(pool)?,
        edges: queries::count_edges(pool)?,
    })
}

/// Delete every node and edge. Returns (nodes, edges) removed.
pub async fn delete_collected_graph_data(pool: &DbPool) -> CoreResult<(usize, usize)> {
    let edges = queries::delete_all_edges(pool)?;
    let nodes = queries::delete_all_nodes(pool)?;
    Ok((nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_snapshot() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec![
                GraphNode {
                    object_id: "S-1-5-21-100-1103".into(),
                    kind: "User".into(),
                    name: "ALICE@CORP.LOCAL".into(),
                    properties: json!({"enabled": true}),
                },
                GraphNode {
                    object_id: "S-1-5-21-100-512".into(),
                    kind: "Group".into(),
                    name: "DOMAIN ADMINS@CORP.LOCAL".into(),
                    properties: json!({}),
                },
            ],
            edges: vec![GraphEdge {
                source: "S-1-5-21-100-1103".into(),
                target: "S-1-5-21-100-512".into(),
                kind: "MemberOf".into(),
            }],
        }
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        store_snapshot(&pool, &sample_snapshot()).await.unwrap();

        let loaded = load_snapshot(&pool).await.unwrap();
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.edges.len(), 1);
        assert_eq!(loaded.nodes[0].properties, json!({"enabled": true}));
        assert_eq!(loaded.edges[0].kind, "MemberOf");
    }

    #[tokio::test]
    async fn test_store_twice_does_not_duplicate() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        store_snapshot(&pool, &sample_snapshot()).await.unwrap();
        store_snapshot(&pool, &sample_snapshot()).await.unwrap();

        let c = counts(&pool).await.unwrap();
        assert_eq!(c.nodes, 2);
        assert_eq!(c.edges, 1);
    }

    #[tokio::test]
    async fn test_delete_collected_graph_data() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        store_snapshot(&pool, &sample_snapshot()).await.unwrap();

        let (nodes, edges) = delete_collected_graph_data(&pool).await.unwrap();
        assert_eq!((nodes, edges), (2, 1));

        let c = counts(&pool).await.unwrap();
        assert_eq!((c.nodes, c.edges), (0, 0));
    }
}
