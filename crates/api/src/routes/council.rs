//! Route definitions for the `/councils` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::council;
use crate::state::AppState;

/// Routes mounted at `/councils`.
///
/// ```text
/// GET    /               -> list_councils
/// POST   /               -> create_council (staff)
/// GET    /{id}           -> get_council
/// DELETE /{id}           -> delete_council (staff)
/// PUT    /{id}/lock      -> toggle_lock (staff)
/// GET    /{id}/status    -> council_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(council::list_councils).post(council::create_council))
        .route(
            "/{id}",
            get(council::get_council).delete(council::delete_council),
        )
        .route("/{id}/lock", put(council::toggle_lock))
        .route("/{id}/status", get(council::council_status))
}
