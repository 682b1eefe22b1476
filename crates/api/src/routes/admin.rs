use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (admin role required).
///
/// ```text
/// POST /digest -> trigger_digest
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/digest", post(admin::trigger_digest))
}
