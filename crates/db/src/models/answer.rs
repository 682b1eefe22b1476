//! Answer entity model and DTOs.

use qna_core::promotion::AnswerFlag;
use qna_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub best: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Answer {
    pub fn flag(&self) -> AnswerFlag {
        AnswerFlag {
            id: self.id,
            best: self.best,
        }
    }
}

/// DTO for creating a new answer. New answers are never best.
#[derive(Debug)]
pub struct CreateAnswer {
    pub question_id: DbId,
    pub user_id: DbId,
    pub body: String,
}
