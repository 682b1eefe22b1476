use qna_core::error::CoreError;
use qna_core::types::DbId;

use crate::delivery::email::EmailError;

/// Failure while executing a background delivery job.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Payload(#[from] CoreError),

    /// A record referenced by the job no longer exists.
    #[error("{entity} {id} no longer exists")]
    Missing { entity: &'static str, id: DbId },
}
