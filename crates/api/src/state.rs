use std::sync::Arc;

use qna_events::JobQueue;

use crate::auth::tokens::TokenSigner;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: qna_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<TokenSigner>,
    /// Where background jobs (notifications, digests) are enqueued.
    pub job_queue: Arc<dyn JobQueue>,
}

impl AppState {
    /// Signing keys are derived from `config` here, once per process.
    pub fn new(pool: qna_db::DbPool, config: ServerConfig, job_queue: Arc<dyn JobQueue>) -> Self {
        Self {
            pool,
            tokens: Arc::new(TokenSigner::from_config(&config)),
            config: Arc::new(config),
            job_queue,
        }
    }
}
