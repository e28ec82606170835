//! Ingest job and task queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

#[derive(Debug, Clone)]
pub struct IngestJobRow {
    pub id: String,
    pub file_name: String,
    pub status: String,
    pub error: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IngestTaskRow {
    pub id: String,
    pub job_id: String,
    pub file_name: String,
    pub payload: String,
    pub created_at: String,
}

pub fn create_job(pool: &DbPool, id: &str, file_name: &str, start_time: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO ingest_jobs (id, file_name, status, start_time) \
             VALUES (?1, ?2, 'running', ?3)",
            params![id, file_name, start_time],
        )?;
        Ok(())
    })
}

pub fn get_job(pool: &DbPool, id: &str) -> DbResult<IngestJobRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, file_name, status, error, start_time, end_time \
             FROM ingest_jobs WHERE id = ?1",
            [id],
            |row| {
                Ok(IngestJobRow {
                    id: row.get(0)?,
                    file_name: row.get(1)?,
                    status: row.get(2)?,
                    error: row.get(3)?,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("Ingest job not found: {}", id)))
    })
}

/// All jobs, newest first.
pub fn list_jobs(pool: &DbPool) -> DbResult<Vec<IngestJobRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, file_name, status, error, start_time, end_time \
             FROM ingest_jobs ORDER BY start_time DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(IngestJobRow {
                id: row.get(0)?,
                file_name: row.get(1)?,
                status: row.get(2)?,
                error: row.get(3)?,
                start_time: row.get(4)?,
                end_time: row.get(5)?,
            })
        })?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row?);
        }
        Ok(jobs)
    })
}

pub fn set_job_status(
    pool: &DbPool,
    id: &str,
    status: &str,
    error: Option<&str>,
    end_time: &str,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE ingest_jobs SET status = ?2, error = ?3, end_time = ?4 WHERE id = ?1",
            params![id, status, error, end_time],
        )?;
        Ok(())
    })
}

/// Mark every running job canceled. Returns the number affected.
pub fn cancel_running_jobs(pool: &DbPool, end_time: &str) -> DbResult<usize> {
    pool.with_conn(|conn| {
        Ok(conn.execute(
            "UPDATE ingest_jobs SET status = 'canceled', end_time = ?1 WHERE status = 'running'",
            [end_time],
        )?)
    })
}

/// Delete the whole ingest log. Returns the number of jobs removed.
pub fn delete_all_jobs(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM ingest_jobs", [])?))
}

pub fn create_task(
    pool: &DbPool,
    id: &str,
    job_id: &str,
    file_name: &str,
    payload: &str,
    created_at: &str,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO ingest_tasks (id, job_id, file_name, payload, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, job_id, file_name, payload, created_at],
        )?;
        Ok(())
    })
}

/// Pending tasks, oldest first.
pub fn list_tasks(pool: &DbPool) -> DbResult<Vec<IngestTaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, job_id, file_name, payload, created_at \
             FROM ingest_tasks ORDER BY created_at",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(IngestTaskRow {
                id: row.get(0)?,
                job_id: row.get(1)?,
                file_name: row.get(2)?,
                payload: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    })
}

pub fn delete_task(pool: &DbPool, id: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute("DELETE FROM ingest_tasks WHERE id = ?1", [id])?;
        Ok(())
    })
}

pub fn delete_all_tasks(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| Ok(conn.execute("DELETE FROM ingest_tasks", [])?))
}
