//! Job queue port.
//!
//! Handlers enqueue work through [`JobQueue`] instead of touching the
//! `jobs` table directly, so tests can swap in [`RecordingJobQueue`].

use std::sync::Mutex;

use async_trait::async_trait;
use qna_core::jobs::JobPayload;
use qna_db::repositories::JobRepo;
use qna_db::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Job queue unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Durably record a job for the worker to pick up.
    async fn enqueue(&self, job: JobPayload) -> Result<(), QueueError>;
}

// ---------------------------------------------------------------------------
// PgJobQueue
// ---------------------------------------------------------------------------

/// Queue backed by the `jobs` table.
#[derive(Clone)]
pub struct PgJobQueue {
    pool: DbPool,
}

impl PgJobQueue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobQueue for PgJobQueue {
    async fn enqueue(&self, job: JobPayload) -> Result<(), QueueError> {
        let row = JobRepo::enqueue(&self.pool, &job).await?;
        tracing::debug!(job_id = row.id, kind = %row.kind, "Job enqueued");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingJobQueue
// ---------------------------------------------------------------------------

/// In-memory queue that records every job. Optionally rejects all jobs to
/// exercise failure paths.
#[derive(Default)]
pub struct RecordingJobQueue {
    jobs: Mutex<Vec<JobPayload>>,
    unavailable: bool,
}

impl RecordingJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose every `enqueue` fails.
    pub fn unavailable() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    /// Snapshot of the jobs recorded so far, in enqueue order.
    pub fn jobs(&self) -> Vec<JobPayload> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl JobQueue for RecordingJobQueue {
    async fn enqueue(&self, job: JobPayload) -> Result<(), QueueError> {
        if self.unavailable {
            return Err(QueueError::Unavailable("recording queue is closed".to_string()));
        }
        self.jobs
            .lock()
            .map_err(|e| QueueError::Unavailable(e.to_string()))?
            .push(job);
        Ok(())
    }
}
