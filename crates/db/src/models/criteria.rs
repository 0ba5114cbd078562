//! Grading criteria model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `criteria` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Criteria {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a criterion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCriteria {
    pub title: String,
    pub description: String,
}
