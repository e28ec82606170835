//! Selective purge of stored data.
//!
//! A reducer-driven flow collects category selections, demands confirmation
//! and submits a single clear-database request to the deletion API. The
//! execution half applies such a request to the local store.

pub mod api;
pub mod model;
pub mod request;

use crate::assetgroup::model::AssetGroupIdSource;
use crate::error::CoreResult;
use api::ClearDatabaseApi;
use model::{reduce, DataCategory, FlowAction, FlowState};
use pathscope_db::queries::datapipe;
use pathscope_db::DbPool;
use request::{build_clear_request, ClearDatabaseRequest};
use serde::Serialize;
use tracing::info;

/// Identity recorded on deletion requests raised through this module.
const DELETION_REQUESTED_BY: &str = "clear-database";

/// Controller owning the purge flow state.
///
/// Every transition goes through [`reduce`]; submission is the only
/// operation with an external side effect, and its `&mut self` receiver
/// keeps a second submission from starting while one is in flight.
pub struct PurgeFlow<S> {
    state: FlowState,
    ids: S,
}

impl<S: AssetGroupIdSource> PurgeFlow<S> {
    pub fn new(ids: S) -> Self {
        Self {
            state: FlowState::default(),
            ids,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn dispatch(&mut self, action: FlowAction) {
        self.state = reduce(self.state.clone(), action);
    }

    /// Set one category checkbox.
    pub fn toggle(&mut self, category: DataCategory, checked: bool) {
        self.dispatch(FlowAction::Toggle { category, checked });
    }

    /// Ask to open the confirmation dialog. Returns whether it opened.
    pub fn request_confirmation(&mut self) -> bool {
        self.dispatch(FlowAction::RequestConfirmation);
        self.state.dialog_open
    }

    /// Close the dialog without submitting.
    pub fn cancel_confirmation(&mut self) {
        self.dispatch(FlowAction::CancelConfirmation);
    }

    /// Close the dialog and submit the deletion request exactly once.
    /// A failed attempt leaves the selection untouched for a re-try.
    pub async fn confirm_and_submit<A: ClearDatabaseApi>(&mut self, api: &A) {
        self.dispatch(FlowAction::CancelConfirmation);

        let request = build_clear_request(&self.state.selection, &self.ids);
        match api.clear_database(&request).await {
            Ok(()) => self.dispatch(FlowAction::MutationSucceeded),
            Err(e) => self.dispatch(FlowAction::MutationFailed {
                message: e.server_message(),
            }),
        }
    }
}

/// What a clear-database request actually removed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ClearDatabaseSummary {
    pub selectors_deleted: usize,
    pub ingest_jobs_deleted: usize,
    pub quality_stats_deleted: usize,
    pub graph_deletion_requested: bool,
}

/// Execute a clear-database request against the store.
///
/// Selector, ingest-history and quality-history deletions run here;
/// collected graph data is only flagged for the datapipe, which services
/// the request on its next tick.
pub async fn run_clear_database(
    pool: &DbPool,
    request: &ClearDatabaseRequest,
) -> CoreResult<ClearDatabaseSummary> {
    let mut summary = ClearDatabaseSummary::default();

    if !request.delete_asset_group_selectors.is_empty() {
        summary.selectors_deleted = crate::assetgroup::delete_selectors_for_groups(
            pool,
            &request.delete_asset_group_selectors,
        )
        .await?;
    }

    if request.delete_file_ingest_history {
        summary.ingest_jobs_deleted = crate::ingest::clear_history(pool).await?;
    }

    if request.delete_data_quality_history {
        summary.quality_stats_deleted = crate::quality::clear_history(pool).await?;
    }

    if request.delete_collected_graph_data {
        let now = chrono::Utc::now().to_rfc3339();
        datapipe::set_request(pool, datapipe::REQUEST_DELETION, DELETION_REQUESTED_BY, &now)?;
        summary.graph_deletion_requested = true;
    }

    info!(?summary, "clear-database request applied");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::api::{ApiErrorDetail, ClearDatabaseError};
    use super::*;
    use crate::assetgroup::model::AssetGroupCatalog;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubApi {
        fail_with: Option<ClearDatabaseError>,
        requests: Mutex<Vec<ClearDatabaseRequest>>,
    }

    impl StubApi {
        fn ok() -> Self {
            Self {
                fail_with: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: ClearDatabaseError) -> Self {
            Self {
                fail_with: Some(error),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ClearDatabaseApi for StubApi {
        async fn clear_database(
            &self,
            request: &ClearDatabaseRequest,
        ) -> Result<(), ClearDatabaseError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    fn catalog() -> AssetGroupCatalog {
        AssetGroupCatalog {
            all_ids: vec![1, 2, 3],
            tier_zero_id: 2,
        }
    }

    #[tokio::test]
    async fn test_successful_submission_resets_selection() {
        let api = StubApi::ok();
        let mut flow = PurgeFlow::new(catalog());

        flow.toggle(DataCategory::AllAssetGroupSelectors, true);
        flow.toggle(DataCategory::CustomHighValueSelectors, true);
        assert!(flow.request_confirmation());

        flow.confirm_and_submit(&api).await;

        let state = flow.state();
        assert!(state.show_success);
        assert!(state.selection.is_empty());
        assert!(!state.dialog_open);

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].delete_asset_group_selectors, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failed_submission_surfaces_server_message() {
        let api = StubApi::failing(ClearDatabaseError {
            status: Some(500),
            errors: vec![ApiErrorDetail {
                context: String::new(),
                message: "disk full".into(),
            }],
        });
        let mut flow = PurgeFlow::new(catalog());

        flow.toggle(DataCategory::CollectedGraphData, true);
        assert!(flow.request_confirmation());
        flow.confirm_and_submit(&api).await;

        let state = flow.state();
        assert!(state.mutation_error);
        assert_eq!(state.mutation_error_message.as_deref(), Some("disk full"));
        assert!(state.selection.collected_graph_data);
        assert!(!state.show_success);
    }

    #[tokio::test]
    async fn test_failure_without_message_leaves_it_unset() {
        let api = StubApi::failing(ClearDatabaseError {
            status: Some(503),
            errors: Vec::new(),
        });
        let mut flow = PurgeFlow::new(catalog());

        flow.toggle(DataCategory::FileIngestHistory, true);
        flow.request_confirmation();
        flow.confirm_and_submit(&api).await;

        let state = flow.state();
        assert!(state.mutation_error);
        assert_eq!(state.mutation_error_message, None);
    }

    #[tokio::test]
    async fn test_empty_selection_never_reaches_the_api() {
        let api = StubApi::ok();
        let mut flow = PurgeFlow::new(catalog());

        assert!(!flow.request_confirmation());
        assert!(flow.state().no_selection_error);
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_clear_database_applies_request() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();
        let catalog = crate::assetgroup::load_catalog(&pool).await.unwrap();

        // Seed one of everything.
        crate::assetgroup::add_selector(&pool, catalog.tier_zero_id, "DA", "S-1-5-21-1-512")
            .await
            .unwrap();
        crate::ingest::submit_file(&pool, "corp.json", "{}").await.unwrap();
        crate::quality::record_snapshot(&pool).await.unwrap();
        crate::graph::store_snapshot(
            &pool,
            &crate::graph::model::GraphSnapshot {
                nodes: vec![crate::graph::model::GraphNode {
                    object_id: "S-1-5-21-1-1103".into(),
                    kind: "User".into(),
                    name: "BOB@CORP.LOCAL".into(),
                    properties: serde_json::Value::Null,
                }],
                edges: Vec::new(),
            },
        )
        .await
        .unwrap();

        let request = ClearDatabaseRequest {
            delete_collected_graph_data: true,
            delete_data_quality_history: true,
            delete_file_ingest_history: true,
            delete_asset_group_selectors: vec![catalog.tier_zero_id],
        };
        let summary = run_clear_database(&pool, &request).await.unwrap();

        assert_eq!(summary.selectors_deleted, 1);
        assert_eq!(summary.ingest_jobs_deleted, 1);
        assert_eq!(summary.quality_stats_deleted, 1);
        assert!(summary.graph_deletion_requested);

        // Graph data is not removed synchronously; the datapipe owns that.
        let counts = crate::graph::counts(&pool).await.unwrap();
        assert_eq!(counts.nodes, 1);
        assert!(pathscope_db::queries::datapipe::has_request(
            &pool,
            pathscope_db::queries::datapipe::REQUEST_DELETION
        )
        .unwrap());
    }
}
