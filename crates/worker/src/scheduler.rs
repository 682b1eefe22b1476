//! Daily digest scheduler.
//!
//! [`DigestScheduler`] sleeps until the configured UTC hour and enqueues a
//! `daily_digest` job. The runner picks it up like any other job, so an
//! admin-triggered digest and the scheduled one take the same path.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use qna_core::digest::next_run_after;
use qna_core::jobs::JobPayload;
use qna_core::types::Timestamp;
use qna_events::{JobQueue, QueueError};
use tokio_util::sync::CancellationToken;

pub struct DigestScheduler {
    queue: Arc<dyn JobQueue>,
    hour_utc: u32,
}

impl DigestScheduler {
    pub fn new(queue: Arc<dyn JobQueue>, hour_utc: u32) -> Self {
        Self { queue, hour_utc }
    }

    /// Time to wait from `now` until the next scheduled run.
    pub fn delay_from(&self, now: Timestamp) -> Duration {
        (next_run_after(now, self.hour_utc) - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Enqueue one digest job.
    pub async fn trigger(&self) -> Result<(), QueueError> {
        self.queue.enqueue(JobPayload::DailyDigest).await
    }

    /// Run the scheduler loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(hour_utc = self.hour_utc, "Digest scheduler started");

        loop {
            let now = Utc::now();
            let delay = self.delay_from(now);
            tracing::debug!(
                next_run = %next_run_after(now, self.hour_utc),
                "Waiting for next digest run"
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Digest scheduler cancelled");
                    break;
                }
                _ = tokio::time::sleep(delay) => {
                    match self.trigger().await {
                        Ok(()) => tracing::info!("Daily digest job enqueued"),
                        Err(e) => tracing::error!(error = %e, "Failed to enqueue daily digest"),
                    }
                }
            }
        }
    }
}
