use std::time::Duration;

/// Default delay between polls of the job queue.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default UTC hour for the daily digest.
pub const DEFAULT_DIGEST_HOUR_UTC: u32 = 8;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    pub poll_interval: Duration,
    /// Hour of day (0-23, UTC) at which the digest job is enqueued.
    pub digest_hour_utc: u32,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `DATABASE_URL`            | (required) |
    /// | `WORKER_POLL_INTERVAL_MS` | `1000`  |
    /// | `DIGEST_HOUR_UTC`         | `8`     |
    ///
    /// SMTP settings are read separately by
    /// [`qna_events::EmailConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or `DIGEST_HOUR_UTC` is not an
    /// hour of the day.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let poll_interval_ms: u64 = std::env::var("WORKER_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        let digest_hour_utc: u32 = std::env::var("DIGEST_HOUR_UTC")
            .ok()
            .map(|v| v.parse().expect("DIGEST_HOUR_UTC must be a valid u32"))
            .unwrap_or(DEFAULT_DIGEST_HOUR_UTC);
        assert!(digest_hour_utc < 24, "DIGEST_HOUR_UTC must be between 0 and 23");

        Self {
            database_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            digest_hour_utc,
        }
    }
}
