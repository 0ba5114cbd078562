//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement with 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use thesis_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` or `ministry` role.
///
/// Guards every write that shapes councils, theses and catalog data.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff() {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Staff route refused");
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Admin or ministry role required, caller is '{}'",
                user.role
            ))));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires any authenticated user.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
