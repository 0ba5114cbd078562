pub mod auth;
pub mod council;
pub mod council_detail;
pub mod health;
pub mod reference;
pub mod score;
pub mod thesis;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                            login (public)
///
/// /users                                 list, register (staff)
/// /users/current-user                    get, update own profile
/// /users/change-password                 change own password (PUT)
///
/// /departments                           list, create
/// /majors                                list, create
/// /ministries                            list, create
/// /students                              list, create
/// /lecturers                             list, create
/// /lecturers/{id}                        deactivate (DELETE)
/// /criteria                              list, create
///
/// /councils                              list, create
/// /councils/{id}                         get with members and status, deactivate
/// /councils/{id}/lock                    toggle lock (PUT)
/// /councils/{id}/status                  fully-scored status
///
/// /council-details                       list, assign lecturer
///
/// /theses                                list, create
/// /theses/total-score                    totals by year
/// /theses/stats/by-major                 counts by student major
/// /theses/{id}                           get with participants
/// /theses/{id}/report                    assembled score report
/// /theses/{id}/report/export             render and store report (POST)
///
/// /scores                                list, enter score
/// /scores/{id}                           edit score (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .merge(reference::router())
        .nest("/councils", council::router())
        .nest("/council-details", council_detail::router())
        .nest("/theses", thesis::router())
        .nest("/scores", score::router())
}
