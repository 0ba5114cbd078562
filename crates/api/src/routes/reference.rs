//! Route definitions for the reference catalogs: departments, majors,
//! ministries, students, lecturers and grading criteria.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{criteria, department, lecturer, major, ministry, student};
use crate::state::AppState;

/// Catalog routes, merged at the `/api/v1` root.
///
/// ```text
/// GET, POST  /departments
/// GET, POST  /majors
/// GET, POST  /ministries
/// GET, POST  /students
/// GET, POST  /lecturers
/// DELETE     /lecturers/{id}
/// GET, POST  /criteria
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(department::list_departments).post(department::create_department),
        )
        .route("/majors", get(major::list_majors).post(major::create_major))
        .route(
            "/ministries",
            get(ministry::list_ministries).post(ministry::create_ministry),
        )
        .route(
            "/students",
            get(student::list_students).post(student::create_student),
        )
        .route(
            "/lecturers",
            get(lecturer::list_lecturers).post(lecturer::create_lecturer),
        )
        .route("/lecturers/{id}", delete(lecturer::delete_lecturer))
        .route(
            "/criteria",
            get(criteria::list_criteria).post(criteria::create_criteria),
        )
}
