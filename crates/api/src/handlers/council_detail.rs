//! Handlers for the `/council-details` resource (role assignments).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use thesis_db::models::council_detail::{CouncilDetail, CreateCouncilDetail};
use thesis_db::repositories::CouncilDetailRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::CouncilScopedParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// GET /api/v1/council-details
///
/// Optional `council_id` filter.
pub async fn list_council_details(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<CouncilScopedParams>,
) -> AppResult<Json<DataResponse<Vec<CouncilDetail>>>> {
    let (limit, offset) = params.page().resolve();
    let details = CouncilDetailRepo::list(&state.pool, params.council_id, limit, offset).await?;
    Ok(Json(DataResponse { data: details }))
}

/// POST /api/v1/council-details
///
/// Assign a lecturer to a council role. Capacity, per-role limits and
/// lecturer uniqueness are enforced; the lecturer is notified by email.
pub async fn create_council_detail(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateCouncilDetail>,
) -> AppResult<(StatusCode, Json<CouncilDetail>)> {
    let detail = workflow::council::assign_member(&state, &input, staff.user_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}
