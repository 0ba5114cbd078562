//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /                   -> list_users (staff)
/// POST  /                   -> create_user (staff)
/// GET   /current-user       -> get_current_user
/// PATCH /current-user       -> update_current_user
/// PUT   /change-password    -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route(
            "/current-user",
            get(user::get_current_user).patch(user::update_current_user),
        )
        .route("/change-password", put(user::change_password))
}
