//! Comment model (polymorphic over questions and answers).

use qna_core::entity::EntityKind;
use qna_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub commentable_type: String,
    pub commentable_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new comment.
#[derive(Debug)]
pub struct CreateComment {
    pub user_id: DbId,
    pub commentable_type: EntityKind,
    pub commentable_id: DbId,
    pub body: String,
}
