use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(profiles::me))
}
