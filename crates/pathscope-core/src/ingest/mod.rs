//! File ingest bookkeeping.
//!
//! Submitting a file records a job (the visible ingest log entry) and a
//! pending task holding the payload; the datapipe drains tasks and settles
//! the jobs.

pub mod model;

use crate::error::CoreResult;
use model::{IngestJob, IngestJobStatus, IngestTask};
use pathscope_db::queries::ingest as queries;
use pathscope_db::DbPool;
use uuid::Uuid;

/// Record a new ingest job plus its pending task.
pub async fn submit_file(pool: &DbPool, file_name: &str, payload: &str) -> CoreResult<IngestJob> {
    let now = chrono::Utc::now().to_rfc3339();
    let job_id = Uuid::new_v4().to_string();

    queries::create_job(pool, &job_id, file_name, &now)?;
    queries::create_task(
        pool,
        &Uuid::new_v4().to_string(),
        &job_id,
        file_name,
        payload,
        &now,
    )?;

    let row = queries::get_job(pool, &job_id)?;
    Ok(IngestJob::from_row(row))
}

/// The file ingest log, newest first.
pub async fn list_history(pool: &DbPool) -> CoreResult<Vec<IngestJob>> {
    let rows = queries::list_jobs(pool)?;
    Ok(rows.into_iter().map(IngestJob::from_row).collect())
}

/// Delete the entire file ingest log. Returns the number of jobs removed.
pub async fn clear_history(pool: &DbPool) -> CoreResult<usize> {
    Ok(queries::delete_all_jobs(pool)?)
}

/// Cancel jobs still marked running. Returns the number affected.
pub async fn cancel_running_jobs(pool: &DbPool) -> CoreResult<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    Ok(queries::cancel_running_jobs(pool, &now)?)
}

/// Tasks waiting for the datapipe, oldest first.
pub async fn pending_tasks(pool: &DbPool) -> CoreResult<Vec<IngestTask>> {
    let rows = queries::list_tasks(pool)?;
    Ok(rows.into_iter().map(IngestTask::from_row).collect())
}

/// Drop every pending task. Returns the number removed.
pub async fn delete_all_tasks(pool: &DbPool) -> CoreResult<usize> {
    Ok(queries::delete_all_tasks(pool)?)
}

/// Remove one drained task.
pub async fn finish_task(pool: &DbPool, task_id: &str) -> CoreResult<()> {
    Ok(queries::delete_task(pool, task_id)?)
}

/// Settle a job as complete.
pub async fn complete_job(pool: &DbPool, job_id: &str) -> CoreResult<()> {
    let now = chrono::Utc::now().to_rfc3339();
    Ok(queries::set_job_status(
        pool,
        job_id,
        IngestJobStatus::Complete.as_str(),
        None,
        &now,
    )?)
}

/// Settle a job as failed, recording the reason.
pub async fn fail_job(pool: &DbPool, job_id: &str, error: &str) -> CoreResult<()> {
    let now = chrono::Utc::now().to_rfc3339();
    Ok(queries::set_job_status(
        pool,
        job_id,
        IngestJobStatus::Failed.as_str(),
        Some(error),
        &now,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_records_job_and_task() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        let job = submit_file(&pool, "corp.json", r#"{"nodes":[]}"#).await.unwrap();
        assert_eq!(job.status, IngestJobStatus::Running);
        assert_eq!(job.file_name, "corp.json");

        let tasks = pending_tasks(&pool).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].job_id, job.id);
        assert_eq!(tasks[0].payload, r#"{"nodes":[]}"#);
    }

    #[tokio::test]
    async fn test_cancel_running_jobs() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        let job = submit_file(&pool, "corp.json", "{}").await.unwrap();
        complete_job(&pool, &job.id).await.unwrap();
        submit_file(&pool, "lab.json", "{}").await.unwrap();

        let canceled = cancel_running_jobs(&pool).await.unwrap();
        assert_eq!(canceled, 1);

        let history = list_history(&pool).await.unwrap();
        let statuses: Vec<_> = history.iter().map(|j| j.status).collect();
        assert!(statuses.contains(&IngestJobStatus::Complete));
        assert!(statuses.contains(&IngestJobStatus::Canceled));
    }

    #[tokio::test]
    async fn test_clear_history_removes_jobs() {
        let pool = pathscope_db::init_pool_in_memory().unwrap();

        submit_file(&pool, "a.json", "{}").await.unwrap();
        submit_file(&pool, "b.json", "{}").await.unwrap();

        let removed = clear_history(&pool).await.unwrap();
        assert_eq!(removed, 2);
        assert!(list_history(&pool).await.unwrap().is_empty());
    }
}
