//! Subscription model: a user following a question's new answers.

use qna_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub question_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
