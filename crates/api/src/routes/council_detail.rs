//! Route definitions for the `/council-details` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::council_detail;
use crate::state::AppState;

/// Routes mounted at `/council-details`.
///
/// ```text
/// GET  /    -> list_council_details
/// POST /    -> create_council_detail (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(council_detail::list_council_details).post(council_detail::create_council_detail),
    )
}
