//! Handlers for the `/majors` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_core::types::DbId;
use thesis_db::models::major::{CreateMajor, Major};
use thesis_db::repositories::MajorRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMajorRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub department_id: Option<DbId>,
}

/// GET /api/v1/majors
pub async fn list_majors(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Major>>>> {
    let majors = MajorRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: majors }))
}

/// POST /api/v1/majors
///
/// An unknown `department_id` is rejected by the foreign key with 400.
pub async fn create_major(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateMajorRequest>,
) -> AppResult<(StatusCode, Json<Major>)> {
    validate_request(&input)?;
    let major = MajorRepo::create(
        &state.pool,
        &CreateMajor {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            department_id: input.department_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(major)))
}
