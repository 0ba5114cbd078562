//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a department.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub code: String,
    pub name: String,
}
