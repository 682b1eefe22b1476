//! Vote handlers for questions and answers (`?direction=up|down`).
//!
//! Voting again in the same direction retracts the vote; the opposite
//! direction flips it. Nobody may vote on their own question or answer.

use axum::extract::{Path, Query, State};
use axum::Json;
use qna_core::entity::EntityKind;
use qna_core::policy;
use qna_core::types::DbId;
use qna_core::votes::VoteChange;
use qna_db::repositories::VoteRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{find_answer, find_question};
use crate::middleware::auth::AuthUser;
use crate::query::VoteParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a vote request.
#[derive(Debug, Serialize)]
pub struct VoteResult {
    pub votable_type: EntityKind,
    pub votable_id: DbId,
    /// The caller's vote after the request (`1`, `-1`, or `null` if retracted).
    pub vote: Option<i16>,
    pub rating: i64,
}

async fn vote(
    state: &AppState,
    user: &AuthUser,
    kind: EntityKind,
    votable_id: DbId,
    owner_id: DbId,
    params: &VoteParams,
) -> AppResult<Json<DataResponse<VoteResult>>> {
    let direction = params.direction()?;

    if !policy::authorize_vote(user.user_id, owner_id).is_authorized() {
        return Err(AppError::forbidden(format!(
            "You cannot vote for your own {kind}"
        )));
    }

    let change = VoteRepo::vote(&state.pool, user.user_id, kind, votable_id, direction).await?;
    let rating = VoteRepo::rating(&state.pool, kind, votable_id).await?;
    tracing::debug!(user_id = user.user_id, %kind, votable_id, ?change, rating, "Vote recorded");

    let vote = match change {
        VoteChange::Cast(value) | VoteChange::Flip(value) => Some(value),
        VoteChange::Retract => None,
    };

    Ok(Json(DataResponse {
        data: VoteResult {
            votable_type: kind,
            votable_id,
            vote,
            rating,
        },
    }))
}

/// PATCH /api/v1/questions/{question_id}/vote
pub async fn vote_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
    Query(params): Query<VoteParams>,
) -> AppResult<Json<DataResponse<VoteResult>>> {
    let question = find_question(&state.pool, question_id).await?;
    vote(
        &state,
        &user,
        EntityKind::Question,
        question.id,
        question.user_id,
        &params,
    )
    .await
}

/// PATCH /api/v1/questions/{question_id}/answers/{answer_id}/vote
pub async fn vote_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path((question_id, answer_id)): Path<(DbId, DbId)>,
    Query(params): Query<VoteParams>,
) -> AppResult<Json<DataResponse<VoteResult>>> {
    let answer = find_answer(&state.pool, question_id, answer_id).await?;
    vote(
        &state,
        &user,
        EntityKind::Answer,
        answer.id,
        answer.user_id,
        &params,
    )
    .await
}
