//! Background datapipe daemon.
//!
//! Services collected-graph-data deletion requests, drains pending ingest
//! tasks and refreshes the data quality history. One instance runs inside
//! the serve process.

use crate::error::CoreResult;
use crate::graph::model::GraphSnapshot;
use crate::notifier::WebNotifier;
use crate::{graph, ingest, quality};
use pathscope_db::queries::datapipe as queries;
use pathscope_db::DbPool;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Current activity of the datapipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatapipeStatus {
    Idle,
    Ingesting,
    Purging,
    Analyzing,
}

impl DatapipeStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            "ingesting" => Self::Ingesting,
            "purging" => Self::Purging,
            "analyzing" => Self::Analyzing,
            _ => Self::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ingesting => "ingesting",
            Self::Purging => "purging",
            Self::Analyzing => "analyzing",
        }
    }
}

/// Read the persisted datapipe status.
pub async fn current_status(pool: &DbPool) -> CoreResult<DatapipeStatus> {
    Ok(DatapipeStatus::from_str(&queries::get_status(pool)?))
}

pub struct Datapipe {
    pool: DbPool,
    notifier: Option<WebNotifier>,
    tick_interval: Duration,
}

impl Datapipe {
    pub fn new(pool: DbPool, tick_interval: Duration) -> Self {
        Self {
            pool,
            notifier: None,
            tick_interval,
        }
    }

    /// Announce status changes through this notifier.
    pub fn with_notifier(mut self, notifier: WebNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run until the surrounding task is dropped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                error!(error = %e, "datapipe tick failed");
            }
        }
    }

    /// One pass over outstanding work.
    pub async fn tick(&self) -> CoreResult<()> {
        if queries::has_request(&self.pool, queries::REQUEST_DELETION)? {
            self.delete_collected_data().await?;
        }

        self.ingest_pending_tasks().await?;

        if queries::has_request(&self.pool, queries::REQUEST_ANALYSIS)? {
            self.analyze().await?;
        }

        Ok(())
    }

    async fn delete_collected_data(&self) -> CoreResult<()> {
        self.set_status(DatapipeStatus::Purging).await?;
        info!("begin purge of collected graph data");

        let canceled_jobs = ingest::cancel_running_jobs(&self.pool).await?;
        let dropped_tasks = ingest::delete_all_tasks(&self.pool).await?;
        let (nodes, edges) = graph::delete_collected_graph_data(&self.pool).await?;
        info!(
            canceled_jobs,
            dropped_tasks, nodes, edges, "purge of collected graph data complete"
        );

        let now = chrono::Utc::now().to_rfc3339();
        queries::clear_request(&self.pool, queries::REQUEST_DELETION)?;
        queries::set_request(&self.pool, queries::REQUEST_ANALYSIS, "datapipe", &now)?;
        self.set_status(DatapipeStatus::Idle).await?;
        Ok(())
    }

    async fn ingest_pending_tasks(&self) -> CoreResult<()> {
        let tasks = ingest::pending_tasks(&self.pool).await?;
        if tasks.is_empty() {
            return Ok(());
        }

        self.set_status(DatapipeStatus::Ingesting).await?;

        for task in tasks {
            match serde_json::from_str::<GraphSnapshot>(&task.payload) {
                Ok(snapshot) => {
                    graph::store_snapshot(&self.pool, &snapshot).await?;
                    ingest::complete_job(&self.pool, &task.job_id).await?;
                    info!(
                        file = %task.file_name,
                        nodes = snapshot.nodes.len(),
                        edges = snapshot.edges.len(),
                        "ingested file"
                    );
                }
                Err(e) => {
                    ingest::fail_job(&self.pool, &task.job_id, &e.to_string()).await?;
                    error!(file = %task.file_name, error = %e, "ingest payload is not a graph snapshot");
                }
            }
            ingest::finish_task(&self.pool, &task.id).await?;
        }

        let now = chrono::Utc::now().to_rfc3339();
        queries::set_request(&self.pool, queries::REQUEST_ANALYSIS, "datapipe", &now)?;
        self.set_status(DatapipeStatus::Idle).await?;
        Ok(())
    }

    async fn analyze(&self) -> CoreResult<()> {
        // Clear the request up front so a re-analysis asked for mid-pass is
        // caught on the next tick.
        queries::clear_request(&self.pool, queries::REQUEST_ANALYSIS)?;
        self.set_status(DatapipeStatus::Analyzing).await?;

        let stat = quality::record_snapshot(&self.pool).await?;
        info!(
            nodes = stat.node_count,
            edges = stat.edge_count,
            selectors = stat.selector_count,
            "data quality snapshot recorded"
        );

        self.set_status(DatapipeStatus::Idle).await?;
        Ok(())
    }

    async fn set_status(&self, status: DatapipeStatus) -> CoreResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::set_status(&self.pool, status.as_str(), &now)?;
        if let Some(notifier) = &self.notifier {
            notifier.notify_datapipe_status(status).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::model::IngestJobStatus;

    fn datapipe(pool: &DbPool) -> Datapipe {
        Datapipe::new(pool.clone(), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_tick_ingests_pending_payloads() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        let payload = r#"{
            "nodes": [
                {"objectId": "S-1-5-21-7-1104", "kind": "Computer", "name": "DC01.CORP.LOCAL"}
            ],
            "edges": []
        }"#;
        crate::ingest::submit_file(&pool, "corp.json", payload).await.unwrap();

        datapipe(&pool).tick().await.unwrap();

        let counts = crate::graph::counts(&pool).await.unwrap();
        assert_eq!(counts.nodes, 1);

        let history = crate::ingest::list_history(&pool).await.unwrap();
        assert_eq!(history[0].status, IngestJobStatus::Complete);
        assert!(crate::ingest::pending_tasks(&pool).await.unwrap().is_empty());

        // The ingest pass requests analysis, serviced within the same tick.
        let quality = crate::quality::list_history(&pool).await.unwrap();
        assert_eq!(quality.len(), 1);
        assert_eq!(quality[0].node_count, 1);

        assert_eq!(current_status(&pool).await.unwrap(), DatapipeStatus::Idle);
    }

    #[tokio::test]
    async fn test_tick_fails_job_on_bad_payload() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        crate::ingest::submit_file(&pool, "broken.json", "[1, 2, 3]").await.unwrap();

        datapipe(&pool).tick().await.unwrap();

        let history = crate::ingest::list_history(&pool).await.unwrap();
        assert_eq!(history[0].status, IngestJobStatus::Failed);
        assert!(history[0].error.is_some());
        assert_eq!(crate::graph::counts(&pool).await.unwrap().nodes, 0);
    }

    #[tokio::test]
    async fn test_tick_services_deletion_request() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        // Collected data plus a running job that the purge must cancel.
        let payload = r#"{"nodes": [{"objectId": "S-1-5-21-7-512", "kind": "Group", "name": "DOMAIN ADMINS@CORP.LOCAL"}]}"#;
        crate::ingest::submit_file(&pool, "corp.json", payload).await.unwrap();
        datapipe(&pool).tick().await.unwrap();
        assert_eq!(crate::graph::counts(&pool).await.unwrap().nodes, 1);

        crate::ingest::submit_file(&pool, "late.json", "{}").await.unwrap();
        let request = crate::purge::request::ClearDatabaseRequest {
            delete_collected_graph_data: true,
            ..Default::default()
        };
        crate::purge::run_clear_database(&pool, &request).await.unwrap();

        datapipe(&pool).tick().await.unwrap();

        assert_eq!(crate::graph::counts(&pool).await.unwrap().nodes, 0);
        assert!(!pathscope_db::queries::datapipe::has_request(
            &pool,
            pathscope_db::queries::datapipe::REQUEST_DELETION
        )
        .unwrap());

        let history = crate::ingest::list_history(&pool).await.unwrap();
        let late = history.iter().find(|j| j.file_name == "late.json").unwrap();
        assert_eq!(late.status, IngestJobStatus::Canceled);

        assert_eq!(current_status(&pool).await.unwrap(), DatapipeStatus::Idle);
    }
}
