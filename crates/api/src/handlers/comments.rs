//! Handlers for comments on questions and answers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use qna_core::entity::EntityKind;
use qna_core::error::CoreError;
use qna_core::forms::CommentForm;
use qna_core::types::DbId;
use qna_db::models::comment::{Comment, CreateComment};
use qna_db::repositories::CommentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonForm;
use crate::handlers::{ensure_owner, owner_of};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn list(
    state: AppState,
    kind: EntityKind,
    id: DbId,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    owner_of(&state.pool, kind, id).await?;
    let comments = CommentRepo::list_for(&state.pool, kind, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

async fn create(
    state: AppState,
    user: AuthUser,
    kind: EntityKind,
    id: DbId,
    form: CommentForm,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    owner_of(&state.pool, kind, id).await?;
    form.validate()?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            user_id: user.user_id,
            commentable_type: kind,
            commentable_id: id,
            body: form.body,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/questions/{question_id}/comments
pub async fn list_for_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    list(state, EntityKind::Question, question_id).await
}

/// POST /api/v1/questions/{question_id}/comments
pub async fn create_for_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
    JsonForm(form): JsonForm<CommentForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    create(state, user, EntityKind::Question, question_id, form).await
}

/// GET /api/v1/answers/{answer_id}/comments
pub async fn list_for_answer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(answer_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    list(state, EntityKind::Answer, answer_id).await
}

/// POST /api/v1/answers/{answer_id}/comments
pub async fn create_for_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(answer_id): Path<DbId>,
    JsonForm(form): JsonForm<CommentForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    create(state, user, EntityKind::Answer, answer_id, form).await
}

/// DELETE /api/v1/comments/{id}
///
/// Only the comment's author may delete it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    ensure_owner(&user, comment.user_id, "delete this comment")?;

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
