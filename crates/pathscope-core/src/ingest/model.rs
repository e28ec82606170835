//! Ingest bookkeeping models.

use pathscope_db::queries::ingest::{IngestJobRow, IngestTaskRow};
use serde::{Deserialize, Serialize};

/// Lifecycle states of a file ingest job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestJobStatus {
    Running,
    Complete,
    Failed,
    Canceled,
}

impl IngestJobStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            "complete" => Self::Complete,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            _ => Self::Running,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

/// One entry of the file ingest log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestJob {
    pub id: String,
    pub file_name: String,
    pub status: IngestJobStatus,
    pub error: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
}

impl IngestJob {
    pub fn from_row(row: IngestJobRow) -> Self {
        Self {
            id: row.id,
            file_name: row.file_name,
            status: IngestJobStatus::from_str(&row.status),
            error: row.error,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

/// A pending unit of ingest work holding the raw payload.
#[derive(Debug, Clone)]
pub struct IngestTask {
    pub id: String,
    pub job_id: String,
    pub file_name: String,
    pub payload: String,
    pub created_at: String,
}

impl IngestTask {
    pub fn from_row(row: IngestTaskRow) -> Self {
        Self {
            id: row.id,
            job_id: row.job_id,
            file_name: row.file_name,
            payload: row.payload,
            created_at: row.created_at,
        }
    }
}
