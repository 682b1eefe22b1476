//! Repository for the `jobs` table.
//!
//! Workers claim jobs with `FOR UPDATE SKIP LOCKED`, so several worker
//! processes can poll the same table without handing out a job twice.

use qna_core::jobs::JobPayload;
use qna_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::Job;
use crate::models::status::JobStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, payload, status_id, attempts, last_error, \
     claimed_at, completed_at, created_at, updated_at";

pub struct JobRepo;

impl JobRepo {
    /// Insert a pending job.
    pub async fn enqueue(pool: &PgPool, payload: &JobPayload) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (kind, payload, status_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(payload.kind())
            .bind(payload.to_json())
            .bind(JobStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest pending job, marking it running.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                status_id = $1,
                attempts = attempts + 1,
                claimed_at = NOW()
             WHERE id = (
                SELECT id FROM jobs
                WHERE status_id = $2
                ORDER BY created_at, id
                LIMIT 1
                FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(JobStatus::Running.id())
            .bind(JobStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    pub async fn complete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs SET status_id = $2, completed_at = NOW(), last_error = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(JobStatus::Completed.id())
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn fail(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs SET status_id = $2, completed_at = NOW(), last_error = $3
             WHERE id = $1",
        )
        .bind(id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Jobs of one kind, oldest first.
    pub async fn list_by_kind(pool: &PgPool, kind: &str) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE kind = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Job>(&query)
            .bind(kind)
            .fetch_all(pool)
            .await
    }
}
