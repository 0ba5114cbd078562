//! Route definitions for the `/scores` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::score;
use crate::state::AppState;

/// Routes mounted at `/scores`.
///
/// ```text
/// GET  /        -> list_scores
/// POST /        -> create_score
/// PUT  /{id}    -> update_score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(score::list_scores).post(score::create_score))
        .route("/{id}", put(score::update_score))
}
