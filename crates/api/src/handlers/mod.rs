//! HTTP handlers, one module per resource.
//!
//! The lookup and ownership helpers below are shared across modules so every
//! handler reports missing records and denied access the same way.

pub mod admin;
pub mod answers;
pub mod attachments;
pub mod auth;
pub mod comments;
pub mod profiles;
pub mod questions;
pub mod subscriptions;
pub mod votes;

use qna_core::entity::EntityKind;
use qna_core::error::CoreError;
use qna_core::policy;
use qna_core::types::DbId;
use qna_db::models::answer::Answer;
use qna_db::models::question::Question;
use qna_db::repositories::{AnswerRepo, QuestionRepo};
use qna_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Load a question or fail with 404.
pub(crate) async fn find_question(pool: &DbPool, id: DbId) -> AppResult<Question> {
    QuestionRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))
}

/// Load an answer that belongs to `question_id` or fail with 404.
pub(crate) async fn find_answer(pool: &DbPool, question_id: DbId, id: DbId) -> AppResult<Answer> {
    AnswerRepo::find_in_question(pool, question_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))
}

/// The owning user of a question or answer, or 404 if it does not exist.
pub(crate) async fn owner_of(pool: &DbPool, kind: EntityKind, id: DbId) -> AppResult<DbId> {
    let owner = match kind {
        EntityKind::Question => QuestionRepo::find_by_id(pool, id).await?.map(|q| q.user_id),
        EntityKind::Answer => AnswerRepo::find_by_id(pool, id).await?.map(|a| a.user_id),
    };
    owner.ok_or(AppError::Core(CoreError::NotFound {
        entity: kind.label(),
        id,
    }))
}

/// Fail with 403 unless `user` owns the record.
pub(crate) fn ensure_owner(user: &AuthUser, owner_id: DbId, action: &str) -> AppResult<()> {
    if policy::authorize_owner(Some(user.user_id), owner_id).is_authorized() {
        Ok(())
    } else {
        tracing::debug!(user_id = user.user_id, owner_id, action, "Access denied");
        Err(AppError::forbidden(format!("Only the author can {action}")))
    }
}
