//! Lecturer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `lecturers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lecturer {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub user_id: DbId,
    pub department_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lecturer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLecturer {
    pub code: String,
    pub name: String,
    pub user_id: DbId,
    pub department_id: DbId,
}

/// Where to reach a lecturer, joined from the linked user.
#[derive(Debug, Clone, FromRow)]
pub struct LecturerContact {
    pub lecturer_id: DbId,
    pub name: String,
    pub email: String,
}
