//! Route definitions for the `/theses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::thesis;
use crate::state::AppState;

/// Routes mounted at `/theses`.
///
/// ```text
/// GET  /                      -> list_theses
/// POST /                      -> create_thesis (staff)
/// GET  /total-score           -> total_scores
/// GET  /stats/by-major        -> stats_by_major
/// GET  /{id}                  -> get_thesis
/// GET  /{id}/report           -> get_report
/// POST /{id}/report/export    -> export_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thesis::list_theses).post(thesis::create_thesis))
        .route("/total-score", get(thesis::total_scores))
        .route("/stats/by-major", get(thesis::stats_by_major))
        .route("/{id}", get(thesis::get_thesis))
        .route("/{id}/report", get(thesis::get_report))
        .route("/{id}/report/export", post(thesis::export_report))
}
