//! Purge flow state machine.
//!
//! A single state value updated only through the closed set of actions in
//! [`FlowAction`]; [`reduce`] is the pure transition function.

/// Deletable categories of stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCategory {
    CollectedGraphData,
    CustomHighValueSelectors,
    AllAssetGroupSelectors,
    FileIngestHistory,
    DataQualityHistory,
}

impl DataCategory {
    pub const ALL: [DataCategory; 5] = [
        DataCategory::CollectedGraphData,
        DataCategory::CustomHighValueSelectors,
        DataCategory::AllAssetGroupSelectors,
        DataCategory::FileIngestHistory,
        DataCategory::DataQualityHistory,
    ];

    /// Checkbox label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CollectedGraphData => "Collected graph data (all nodes and edges)",
            Self::CustomHighValueSelectors => "Custom High Value selectors",
            Self::AllAssetGroupSelectors => "All asset group selectors",
            Self::FileIngestHistory => "File ingest log history",
            Self::DataQualityHistory => "Data quality history",
        }
    }
}

/// Which categories are ticked for deletion. Flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub collected_graph_data: bool,
    pub custom_high_value_selectors: bool,
    pub all_asset_group_selectors: bool,
    pub file_ingest_history: bool,
    pub data_quality_history: bool,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        !(self.collected_graph_data
            || self.custom_high_value_selectors
            || self.all_asset_group_selectors
            || self.file_ingest_history
            || self.data_quality_history)
    }

    pub fn get(&self, category: DataCategory) -> bool {
        match category {
            DataCategory::CollectedGraphData => self.collected_graph_data,
            DataCategory::CustomHighValueSelectors => self.custom_high_value_selectors,
            DataCategory::AllAssetGroupSelectors => self.all_asset_group_selectors,
            DataCategory::FileIngestHistory => self.file_ingest_history,
            DataCategory::DataQualityHistory => self.data_quality_history,
        }
    }

    fn set(&mut self, category: DataCategory, checked: bool) {
        match category {
            DataCategory::CollectedGraphData => self.collected_graph_data = checked,
            DataCategory::CustomHighValueSelectors => self.custom_high_value_selectors = checked,
            DataCategory::AllAssetGroupSelectors => self.all_asset_group_selectors = checked,
            DataCategory::FileIngestHistory => self.file_ingest_history = checked,
            DataCategory::DataQualityHistory => self.data_quality_history = checked,
        }
    }
}

/// Observable state of the purge flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    pub selection: Selection,
    pub no_selection_error: bool,
    pub mutation_error: bool,
    pub mutation_error_message: Option<String>,
    pub show_success: bool,
    pub dialog_open: bool,
}

/// The closed set of transitions the flow accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    Toggle { category: DataCategory, checked: bool },
    RequestConfirmation,
    CancelConfirmation,
    MutationFailed { message: Option<String> },
    MutationSucceeded,
}

/// Apply one action to the flow state.
///
/// Invariant: the no-selection and mutation errors are mutually exclusive;
/// setting either clears the other.
pub fn reduce(state: FlowState, action: FlowAction) -> FlowState {
    let mut next = state;
    match action {
        FlowAction::Toggle { category, checked } => {
            next.selection.set(category, checked);
            next.no_selection_error = false;
        }
        FlowAction::RequestConfirmation => {
            if next.selection.is_empty() {
                next.no_selection_error = true;
                next.mutation_error = false;
                next.mutation_error_message = None;
            } else {
                next.no_selection_error = false;
                next.dialog_open = true;
            }
        }
        FlowAction::CancelConfirmation => {
            next.dialog_open = false;
        }
        FlowAction::MutationFailed { message } => {
            next.mutation_error = true;
            next.mutation_error_message = message;
            next.no_selection_error = false;
        }
        FlowAction::MutationSucceeded => {
            next.selection = Selection::default();
            next.show_success = true;
        }
    }
    next
}
