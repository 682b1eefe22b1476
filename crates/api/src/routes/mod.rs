pub mod admin;
pub mod answers;
pub mod auth;
pub mod health;
pub mod profiles;
pub mod questions;

use axum::routing::delete;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route except register, login and refresh requires a Bearer token.
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
///
/// /profiles/me                                     current user
///
/// /questions                                       list (paginated), create
/// /questions/{question_id}                         show, update, delete
/// /questions/{question_id}/vote                    vote (PATCH ?direction=up|down)
/// /questions/{question_id}/subscription            subscribe (POST), unsubscribe (DELETE)
/// /questions/{question_id}/comments                list, create
/// /questions/{question_id}/attachments             list, create
/// /questions/{question_id}/answers                 list, create
/// /questions/{question_id}/answers/{answer_id}     show, update, delete
/// /questions/{question_id}/answers/{answer_id}/switch_promotion   toggle best (PATCH)
/// /questions/{question_id}/answers/{answer_id}/vote               vote (PATCH)
///
/// /answers/{answer_id}/comments                    list, create
/// /answers/{answer_id}/attachments                 list, create
///
/// /comments/{id}                                   delete (author only)
/// /attachments/{id}                                delete (owner of parent only)
///
/// /admin/digest                                    enqueue daily digest (POST, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profiles", profiles::router())
        .nest("/questions", questions::router())
        .nest("/answers", answers::router())
        .route("/comments/{id}", delete(handlers::comments::delete))
        .route("/attachments/{id}", delete(handlers::attachments::delete))
        .nest("/admin", admin::router())
}
