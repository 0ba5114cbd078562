//! Council entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `councils` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Council {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub is_blocked: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a council. New councils start unlocked.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCouncil {
    pub code: String,
    pub name: String,
}
