//! Route definitions for comments and attachments addressed by answer id.

use axum::routing::get;
use axum::Router;

use crate::handlers::{attachments, comments};
use crate::state::AppState;

/// Routes mounted at `/answers`.
///
/// ```text
/// GET  /{answer_id}/comments     -> comments::list_for_answer
/// POST /{answer_id}/comments     -> comments::create_for_answer
/// GET  /{answer_id}/attachments  -> attachments::list_for_answer
/// POST /{answer_id}/attachments  -> attachments::create_for_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{answer_id}/comments",
            get(comments::list_for_answer).post(comments::create_for_answer),
        )
        .route(
            "/{answer_id}/attachments",
            get(attachments::list_for_answer).post(attachments::create_for_answer),
        )
}
