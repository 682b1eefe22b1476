//! Admin-only maintenance endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use qna_core::jobs::JobPayload;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/admin/digest
///
/// Enqueue a daily digest run now. Returns 202; the worker sends the emails.
pub async fn trigger_digest(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<StatusCode> {
    state.job_queue.enqueue(JobPayload::DailyDigest).await?;
    tracing::info!(user_id = admin.user_id, "Daily digest triggered manually");
    Ok(StatusCode::ACCEPTED)
}
