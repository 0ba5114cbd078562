//! Handlers for the `/councils` resource.
//!
//! Reads are open to any authenticated user; creation, locking and
//! deactivation require staff.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use thesis_core::error::CoreError;
use thesis_core::types::DbId;
use thesis_db::models::council::{Council, CreateCouncil};
use thesis_db::models::council_detail::CouncilMember;
use thesis_db::repositories::{CouncilDetailRepo, CouncilRepo};
use validator::Validate;

use super::validate_request;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;
use crate::workflow::council::CouncilStatus;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCouncilRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// A council with its members and scoring status.
#[derive(Debug, Serialize)]
pub struct CouncilDetailResponse {
    #[serde(flatten)]
    pub council: Council,
    pub members: Vec<CouncilMember>,
    pub status: CouncilStatus,
}

/// GET /api/v1/councils
pub async fn list_councils(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Council>>>> {
    let councils = CouncilRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: councils }))
}

/// POST /api/v1/councils
///
/// New councils start unlocked and empty.
pub async fn create_council(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateCouncilRequest>,
) -> AppResult<(StatusCode, Json<Council>)> {
    validate_request(&input)?;
    let council = CouncilRepo::create(
        &state.pool,
        &CreateCouncil {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(council_id = council.id, created_by = staff.user_id, "Council created");
    Ok((StatusCode::CREATED, Json(council)))
}

/// GET /api/v1/councils/{id}
pub async fn get_council(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<CouncilDetailResponse>> {
    let council = CouncilRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Council",
            id,
        }))?;
    let members = CouncilDetailRepo::list_members(&state.pool, id).await?;
    let status = workflow::council::status(&state, id).await?;

    Ok(Json(CouncilDetailResponse {
        council,
        members,
        status,
    }))
}

/// DELETE /api/v1/councils/{id}
///
/// 409 while the council still has members or theses.
pub async fn delete_council(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    workflow::council::deactivate(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/councils/{id}/lock
///
/// Toggle the lock. Locking fails with 409 `INCOMPLETE_SCORING` while any
/// thesis of the council has no score.
pub async fn toggle_lock(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Council>> {
    let council = workflow::council::toggle_lock(&state, id, staff.user_id).await?;
    Ok(Json(council))
}

/// GET /api/v1/councils/{id}/status
pub async fn council_status(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<CouncilStatus>> {
    let status = workflow::council::status(&state, id).await?;
    Ok(Json(status))
}
