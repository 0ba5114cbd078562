//! Handlers for the `/scores` resource.
//!
//! Any authenticated user may enter scores; the rule engine decides whether
//! the write is allowed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use thesis_core::types::DbId;
use thesis_db::models::score::{CreateScore, Score, UpdateScore};
use thesis_db::repositories::ScoreRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::query::{PaginationParams, ScoreListParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// GET /api/v1/scores
pub async fn list_scores(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ScoreListParams>,
) -> AppResult<Json<DataResponse<Vec<Score>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let scores =
        ScoreRepo::list(&state.pool, params.thesis_id, params.criteria_id, limit, offset).await?;
    Ok(Json(DataResponse { data: scores }))
}

/// POST /api/v1/scores
pub async fn create_score(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<CreateScore>,
) -> AppResult<(StatusCode, Json<Score>)> {
    let score = workflow::score::record(&state, &input, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(score)))
}

/// PUT /api/v1/scores/{id}
pub async fn update_score(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScore>,
) -> AppResult<Json<Score>> {
    let score = workflow::score::update(&state, id, &input, auth.user_id).await?;
    Ok(Json(score))
}
