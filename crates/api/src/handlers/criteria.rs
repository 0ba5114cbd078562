//! Handlers for the `/criteria` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_db::models::criteria::{CreateCriteria, Criteria};
use thesis_db::repositories::CriteriaRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCriteriaRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// GET /api/v1/criteria
///
/// `q` matches the title; `code` is ignored.
pub async fn list_criteria(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Criteria>>>> {
    let criteria = CriteriaRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: criteria }))
}

/// POST /api/v1/criteria
pub async fn create_criteria(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateCriteriaRequest>,
) -> AppResult<(StatusCode, Json<Criteria>)> {
    validate_request(&input)?;
    let criteria = CriteriaRepo::create(
        &state.pool,
        &CreateCriteria {
            title: input.title.trim().to_string(),
            description: input.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(criteria)))
}
