//! Route definitions for the `/questions` resource.
//!
//! Answers are nested under `/questions/{question_id}/answers`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{answers, attachments, comments, questions, subscriptions, votes};
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /                                                   -> questions::index
/// POST   /                                                   -> questions::create
/// GET    /{question_id}                                      -> questions::show
/// PATCH  /{question_id}                                      -> questions::update
/// DELETE /{question_id}                                      -> questions::destroy
/// PATCH  /{question_id}/vote                                 -> votes::vote_question
/// POST   /{question_id}/subscription                         -> subscriptions::subscribe
/// DELETE /{question_id}/subscription                         -> subscriptions::unsubscribe
/// GET    /{question_id}/comments                             -> comments::list_for_question
/// POST   /{question_id}/comments                             -> comments::create_for_question
/// GET    /{question_id}/attachments                          -> attachments::list_for_question
/// POST   /{question_id}/attachments                          -> attachments::create_for_question
///
/// GET    /{question_id}/answers                              -> answers::index
/// POST   /{question_id}/answers                              -> answers::create
/// GET    /{question_id}/answers/{answer_id}                  -> answers::show
/// PATCH  /{question_id}/answers/{answer_id}                  -> answers::update
/// DELETE /{question_id}/answers/{answer_id}                  -> answers::destroy
/// PATCH  /{question_id}/answers/{answer_id}/switch_promotion -> answers::switch_promotion
/// PATCH  /{question_id}/answers/{answer_id}/vote             -> votes::vote_answer
/// ```
pub fn router() -> Router<AppState> {
    let answer_routes = Router::new()
        .route("/", get(answers::index).post(answers::create))
        .route(
            "/{answer_id}",
            get(answers::show)
                .patch(answers::update)
                .delete(answers::destroy),
        )
        .route(
            "/{answer_id}/switch_promotion",
            patch(answers::switch_promotion),
        )
        .route("/{answer_id}/vote", patch(votes::vote_answer));

    Router::new()
        .route("/", get(questions::index).post(questions::create))
        .route(
            "/{question_id}",
            get(questions::show)
                .patch(questions::update)
                .delete(questions::destroy),
        )
        .route("/{question_id}/vote", patch(votes::vote_question))
        .route(
            "/{question_id}/subscription",
            post(subscriptions::subscribe).delete(subscriptions::unsubscribe),
        )
        .route(
            "/{question_id}/comments",
            get(comments::list_for_question).post(comments::create_for_question),
        )
        .route(
            "/{question_id}/attachments",
            get(attachments::list_for_question).post(attachments::create_for_question),
        )
        .nest("/{question_id}/answers", answer_routes)
}
