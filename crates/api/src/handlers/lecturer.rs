//! Handlers for the `/lecturers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_core::types::DbId;
use thesis_db::models::lecturer::{CreateLecturer, Lecturer};
use thesis_db::repositories::LecturerRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLecturerRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub user_id: DbId,
    pub department_id: DbId,
}

/// GET /api/v1/lecturers
pub async fn list_lecturers(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Lecturer>>>> {
    let lecturers = LecturerRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: lecturers }))
}

/// POST /api/v1/lecturers
pub async fn create_lecturer(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateLecturerRequest>,
) -> AppResult<(StatusCode, Json<Lecturer>)> {
    validate_request(&input)?;
    let lecturer = LecturerRepo::create(
        &state.pool,
        &CreateLecturer {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            user_id: input.user_id,
            department_id: input.department_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(lecturer)))
}

/// DELETE /api/v1/lecturers/{id}
///
/// 409 while the lecturer still holds a council role.
pub async fn delete_lecturer(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    workflow::council::deactivate_lecturer(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
