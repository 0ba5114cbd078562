//! Handlers for the `/ministries` resource (ministry staff records).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_core::types::DbId;
use thesis_db::models::ministry::{CreateMinistry, Ministry};
use thesis_db::repositories::MinistryRepo;
use validator::Validate;

use super::validate_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMinistryRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub user_id: DbId,
}

/// GET /api/v1/ministries
pub async fn list_ministries(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Ministry>>>> {
    let ministries = MinistryRepo::list(&state.pool, &params.to_filter()).await?;
    Ok(Json(DataResponse { data: ministries }))
}

/// POST /api/v1/ministries
pub async fn create_ministry(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateMinistryRequest>,
) -> AppResult<(StatusCode, Json<Ministry>)> {
    validate_request(&input)?;
    let ministry = MinistryRepo::create(
        &state.pool,
        &CreateMinistry {
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            user_id: input.user_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ministry)))
}
