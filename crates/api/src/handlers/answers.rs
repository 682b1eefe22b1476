//! Handlers for answers, nested under `/questions/{question_id}/answers`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use qna_core::entity::EntityKind;
use qna_core::error::CoreError;
use qna_core::forms::AnswerForm;
use qna_core::types::DbId;
use qna_db::models::answer::{Answer, CreateAnswer};
use qna_db::models::comment::Comment;
use qna_db::repositories::{AnswerRepo, CommentRepo, SubscriptionRepo, VoteRepo};
use qna_events::notify::notify_subscribers;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonForm;
use crate::handlers::attachments::{self, AttachmentView};
use crate::handlers::{ensure_owner, find_answer, find_question};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Full answer view returned by `show`.
#[derive(Debug, Serialize)]
pub struct AnswerDetail {
    #[serde(flatten)]
    pub answer: Answer,
    pub rating: i64,
    pub attachments: Vec<AttachmentView>,
    pub comments: Vec<Comment>,
}

/// GET /api/v1/questions/{question_id}/answers
///
/// Best answer first, then oldest first.
pub async fn index(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Answer>>>> {
    let question = find_question(&state.pool, question_id).await?;
    let answers = AnswerRepo::list_by_question(&state.pool, question.id).await?;
    Ok(Json(DataResponse { data: answers }))
}

/// GET /api/v1/questions/{question_id}/answers/{answer_id}
pub async fn show(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((question_id, answer_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<AnswerDetail>>> {
    let answer = find_answer(&state.pool, question_id, answer_id).await?;

    let attachments = attachments::views_for(&state, EntityKind::Answer, answer.id).await?;
    let comments = CommentRepo::list_for(&state.pool, EntityKind::Answer, answer.id).await?;
    let rating = VoteRepo::rating(&state.pool, EntityKind::Answer, answer.id).await?;

    Ok(Json(DataResponse {
        data: AnswerDetail {
            answer,
            rating,
            attachments,
            comments,
        },
    }))
}

/// POST /api/v1/questions/{question_id}/answers
///
/// Persists the answer, then enqueues one notification job per subscriber of
/// the question. A queue failure is logged; the answer still counts as
/// created.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
    JsonForm(form): JsonForm<AnswerForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Answer>>)> {
    let question = find_question(&state.pool, question_id).await?;
    form.validate()?;

    let answer = AnswerRepo::create(
        &state.pool,
        &CreateAnswer {
            question_id: question.id,
            user_id: user.user_id,
            body: form.body,
        },
    )
    .await?;
    tracing::info!(answer_id = answer.id, question_id, user_id = user.user_id, "Answer created");

    let subscriptions = SubscriptionRepo::list_by_question(&state.pool, question.id).await?;
    if let Err(e) = notify_subscribers(state.job_queue.as_ref(), &answer, &subscriptions).await {
        tracing::error!(
            answer_id = answer.id,
            question_id,
            error = %e,
            "Failed to enqueue answer notifications"
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// PATCH /api/v1/questions/{question_id}/answers/{answer_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((question_id, answer_id)): Path<(DbId, DbId)>,
    JsonForm(form): JsonForm<AnswerForm>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = find_answer(&state.pool, question_id, answer_id).await?;
    ensure_owner(&user, answer.user_id, "edit this answer")?;
    form.validate()?;

    let updated = AnswerRepo::update_body(&state.pool, answer.id, &form.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/questions/{question_id}/answers/{answer_id}
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path((question_id, answer_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let answer = find_answer(&state.pool, question_id, answer_id).await?;
    ensure_owner(&user, answer.user_id, "delete this answer")?;

    AnswerRepo::delete(&state.pool, answer.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/questions/{question_id}/answers/{answer_id}/switch_promotion
///
/// Toggles the answer's best flag. Only the answer's author may switch it;
/// anyone else gets 403 and nothing changes.
pub async fn switch_promotion(
    State(state): State<AppState>,
    user: AuthUser,
    Path((question_id, answer_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = find_answer(&state.pool, question_id, answer_id).await?;
    ensure_owner(&user, answer.user_id, "switch the promotion of this answer")?;

    let switched = AnswerRepo::switch_promotion(&state.pool, answer.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;
    tracing::info!(answer_id, question_id, best = switched.best, "Answer promotion switched");

    Ok(Json(DataResponse { data: switched }))
}
