//! Ministry staff entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `ministries` table. Each row is linked to exactly one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ministry {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub user_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a ministry staff record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMinistry {
    pub code: String,
    pub name: String,
    pub user_id: DbId,
}
