//! Handlers for the `/students` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use thesis_core::thesis::validate_study_period;
use thesis_core::types::DbId;
use thesis_db::models::student::{CreateStudent, Student};
use thesis_db::repositories::StudentRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub major_id: DbId,
    pub user_id: DbId,
    pub start_study: NaiveDate,
    pub end_study: NaiveDate,
}

/// GET /api/v1/students
pub async fn list_students(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let students = StudentRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: students }))
}

/// POST /api/v1/students
///
/// The study period must span at least four calendar years.
pub async fn create_student(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<Student>)> {
    validate_request(&input)?;
    validate_study_period(input.start_study, input.end_study)?;

    let student = StudentRepo::create(
        &state.pool,
        &CreateStudent {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            major_id: input.major_id,
            user_id: input.user_id,
            start_study: input.start_study,
            end_study: input.end_study,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(student)))
}
