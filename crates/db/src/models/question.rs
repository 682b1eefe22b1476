//! Question entity model and DTOs.

use qna_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new question.
#[derive(Debug)]
pub struct CreateQuestion {
    pub user_id: DbId,
    pub title: String,
    pub body: String,
}

/// DTO for updating a question. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateQuestion {
    pub title: Option<String>,
    pub body: Option<String>,
}
