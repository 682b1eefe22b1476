//! Job runner.
//!
//! Polls the `jobs` table every `poll_interval`, claims pending jobs with
//! [`JobRepo::claim_next`] (`FOR UPDATE SKIP LOCKED`, so several workers
//! never run the same job) and executes them. A failed job is marked
//! `failed` with its error message and is not retried.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use qna_core::jobs::JobPayload;
use qna_core::types::DbId;
use qna_db::models::job::Job;
use qna_db::repositories::JobRepo;
use qna_db::DbPool;
use qna_events::notify::deliver_answer_notification;
use qna_events::{DailyDigest, DeliveryError, Mailer};
use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_POLL_INTERVAL_MS;

/// What happened to a claimed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { job_id: DbId },
    Failed { job_id: DbId, error: String },
}

pub struct JobRunner {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    poll_interval: Duration,
}

impl JobRunner {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            pool,
            mailer,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run the polling loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Job runner started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Job runner shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.drain(&cancel).await {
                        tracing::error!(error = %e, "Job poll cycle failed");
                    }
                }
            }
        }
    }

    /// Execute jobs until the queue is empty or shutdown is requested.
    async fn drain(&self, cancel: &CancellationToken) -> Result<(), sqlx::Error> {
        while !cancel.is_cancelled() {
            if self.run_next().await?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Claim and execute one pending job. Returns `None` when the queue is
    /// empty.
    pub async fn run_next(&self) -> Result<Option<JobOutcome>, sqlx::Error> {
        let Some(job) = JobRepo::claim_next(&self.pool).await? else {
            return Ok(None);
        };
        tracing::debug!(job_id = job.id, kind = %job.kind, attempts = job.attempts, "Job claimed");

        let outcome = match self.execute(&job).await {
            Ok(()) => {
                JobRepo::complete(&self.pool, job.id).await?;
                tracing::info!(job_id = job.id, kind = %job.kind, "Job completed");
                JobOutcome::Completed { job_id: job.id }
            }
            Err(e) => {
                let error = e.to_string();
                JobRepo::fail(&self.pool, job.id, &error).await?;
                tracing::error!(job_id = job.id, kind = %job.kind, error = %error, "Job failed");
                JobOutcome::Failed {
                    job_id: job.id,
                    error,
                }
            }
        };
        Ok(Some(outcome))
    }

    async fn execute(&self, job: &Job) -> Result<(), DeliveryError> {
        match JobPayload::from_parts(&job.kind, &job.payload)? {
            JobPayload::AnswerNotification(notification) => {
                deliver_answer_notification(&self.pool, self.mailer.as_ref(), notification).await
            }
            JobPayload::DailyDigest => {
                let report =
                    DailyDigest::deliver(&self.pool, self.mailer.as_ref(), Utc::now()).await?;
                tracing::info!(
                    job_id = job.id,
                    questions = report.questions,
                    sent = report.sent,
                    failed = report.failed,
                    "Daily digest delivered",
                );
                Ok(())
            }
        }
    }
}
