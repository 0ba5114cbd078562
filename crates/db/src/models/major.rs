//! Major entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `majors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Major {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub department_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a major.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMajor {
    pub code: String,
    pub name: String,
    pub department_id: Option<DbId>,
}
