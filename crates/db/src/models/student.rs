//! Student entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub major_id: DbId,
    pub user_id: DbId,
    pub start_study: NaiveDate,
    pub end_study: NaiveDate,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub code: String,
    pub name: String,
    pub major_id: DbId,
    pub user_id: DbId,
    pub start_study: NaiveDate,
    pub end_study: NaiveDate,
}
