//! Subscribe to / unsubscribe from a question's new answers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use qna_core::types::DbId;
use qna_db::models::subscription::Subscription;
use qna_db::repositories::SubscriptionRepo;

use crate::error::AppResult;
use crate::handlers::find_question;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/questions/{question_id}/subscription
///
/// Idempotent: subscribing twice returns the existing subscription.
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Subscription>>)> {
    let question = find_question(&state.pool, question_id).await?;
    let subscription = SubscriptionRepo::subscribe(&state.pool, user.user_id, question.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: subscription })))
}

/// DELETE /api/v1/questions/{question_id}/subscription
pub async fn unsubscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let question = find_question(&state.pool, question_id).await?;
    SubscriptionRepo::unsubscribe(&state.pool, user.user_id, question.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
