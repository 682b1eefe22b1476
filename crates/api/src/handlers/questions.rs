//! Handlers for the `/questions` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use qna_core::entity::EntityKind;
use qna_core::forms::{QuestionForm, QuestionUpdateForm};
use qna_core::promotion;
use qna_core::text;
use qna_core::types::DbId;
use qna_db::models::answer::Answer;
use qna_db::models::comment::Comment;
use qna_db::models::question::{CreateQuestion, Question, UpdateQuestion};
use qna_db::repositories::{AnswerRepo, CommentRepo, QuestionRepo, VoteRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::JsonForm;
use crate::handlers::attachments::{self, AttachmentView};
use crate::handlers::{ensure_owner, find_question};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageMeta, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Listing entry: the question, its short title and its answers.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    #[serde(flatten)]
    pub question: Question,
    pub short_title: String,
    pub answers: Vec<Answer>,
}

/// Full question view returned by `show`.
#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub question: Question,
    pub short_title: String,
    pub rating: i64,
    /// The caller's own vote on the question (`1` or `-1`).
    pub my_vote: Option<i16>,
    pub best_answer_id: Option<DbId>,
    pub answers: Vec<Answer>,
    pub attachments: Vec<AttachmentView>,
    pub comments: Vec<Comment>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/questions
///
/// Newest first, 20 per page unless `limit` says otherwise.
pub async fn index(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<QuestionSummary>>> {
    let (limit, offset) = (params.limit(), params.offset());
    let questions = QuestionRepo::list(&state.pool, limit, offset).await?;
    let total = QuestionRepo::count(&state.pool).await?;

    let ids: Vec<DbId> = questions.iter().map(|q| q.id).collect();
    let mut answers_by_question: HashMap<DbId, Vec<Answer>> = HashMap::new();
    for answer in AnswerRepo::list_by_questions(&state.pool, &ids).await? {
        answers_by_question
            .entry(answer.question_id)
            .or_default()
            .push(answer);
    }

    let data = questions
        .into_iter()
        .map(|question| QuestionSummary {
            short_title: text::short_title(&question.title),
            answers: answers_by_question.remove(&question.id).unwrap_or_default(),
            question,
        })
        .collect();

    Ok(Json(PageResponse {
        data,
        meta: PageMeta {
            total,
            limit,
            offset,
        },
    }))
}

/// GET /api/v1/questions/{question_id}
pub async fn show(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuestionDetail>>> {
    let question = find_question(&state.pool, question_id).await?;

    let answers = AnswerRepo::list_by_question(&state.pool, question.id).await?;
    let attachments = attachments::views_for(&state, EntityKind::Question, question.id).await?;
    let comments = CommentRepo::list_for(&state.pool, EntityKind::Question, question.id).await?;
    let rating = VoteRepo::rating(&state.pool, EntityKind::Question, question.id).await?;
    let my_vote = VoteRepo::find(&state.pool, user.user_id, EntityKind::Question, question.id)
        .await?
        .map(|vote| vote.value);
    let flags: Vec<_> = answers.iter().map(Answer::flag).collect();

    Ok(Json(DataResponse {
        data: QuestionDetail {
            short_title: text::short_title(&question.title),
            question,
            rating,
            my_vote,
            best_answer_id: promotion::best_answer(&flags),
            answers,
            attachments,
            comments,
        },
    }))
}

/// POST /api/v1/questions
///
/// The author is subscribed to the new question in the same transaction.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonForm(form): JsonForm<QuestionForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Question>>)> {
    form.validate()?;

    let question = QuestionRepo::create(
        &state.pool,
        &CreateQuestion {
            user_id: user.user_id,
            title: form.title,
            body: form.body,
        },
    )
    .await?;
    tracing::info!(question_id = question.id, user_id = user.user_id, "Question created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PATCH /api/v1/questions/{question_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
    JsonForm(form): JsonForm<QuestionUpdateForm>,
) -> AppResult<Json<DataResponse<Question>>> {
    let question = find_question(&state.pool, question_id).await?;
    ensure_owner(&user, question.user_id, "edit this question")?;
    form.validate()?;

    let updated = QuestionRepo::update(
        &state.pool,
        question.id,
        &UpdateQuestion {
            title: form.title,
            body: form.body,
        },
    )
    .await?
    .unwrap_or(question);

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/questions/{question_id}
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let question = find_question(&state.pool, question_id).await?;
    ensure_owner(&user, question.user_id, "delete this question")?;

    QuestionRepo::delete(&state.pool, question.id).await?;
    tracing::info!(question_id, user_id = user.user_id, "Question deleted");
    Ok(StatusCode::NO_CONTENT)
}
