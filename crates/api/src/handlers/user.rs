//! Handlers for the `/users` resource.
//!
//! Listing and registration are staff-only; the `current-user` endpoints
//! operate on the caller's own account.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thesis_core::error::CoreError;
use thesis_core::roles::UserRole;
use thesis_db::models::user::{CreateUser, UpdateUser, UserResponse};
use thesis_db::repositories::UserRepo;
use validator::Validate;

use super::validate_request;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub role: String,
}

/// Request body for `PATCH /users/current-user`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Request body for `PUT /users/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let filter = params.to_filter();
    let users =
        UserRepo::list(&state.pool, filter.pattern.as_deref(), filter.limit, filter.offset).await?;

    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/v1/users
///
/// Register a user. The password is checked for strength and stored as an
/// Argon2id hash.
pub async fn create_user(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_request(&input)?;
    let role = UserRole::from_str_value(&input.role)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            avatar_url: input.avatar_url,
            role: role.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, created_by = staff.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/current-user
pub async fn get_current_user(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/current-user
pub async fn update_current_user(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_request(&input)?;

    let user = UserRepo::update_profile(
        &state.pool,
        auth.user_id,
        &UpdateUser {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            avatar_url: input.avatar_url,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth.user_id,
    }))?;

    Ok(Json(user.into()))
}

/// PUT /api/v1/users/change-password
///
/// Requires the current password; the new one must pass the strength check.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let current_ok = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    tracing::info!(user_id = user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
