//! Handlers for the `/departments` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_db::models::department::{CreateDepartment, Department};
use thesis_db::repositories::DepartmentRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// GET /api/v1/departments
pub async fn list_departments(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let departments = DepartmentRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// POST /api/v1/departments
pub async fn create_department(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<Department>)> {
    validate_request(&input)?;
    let department = DepartmentRepo::create(
        &state.pool,
        &CreateDepartment {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(department)))
}
