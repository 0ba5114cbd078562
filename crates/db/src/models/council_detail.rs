//! Council detail (role assignment) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `council_details` table: one lecturer holding one role in
/// one council.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouncilDetail {
    pub id: DbId,
    pub role: String,
    pub lecturer_id: DbId,
    pub council_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a lecturer to a council.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCouncilDetail {
    pub role: String,
    pub lecturer_id: DbId,
    pub council_id: DbId,
}

/// A council member row with the lecturer's name resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouncilMember {
    pub id: DbId,
    pub role: String,
    pub lecturer_id: DbId,
    pub lecturer_name: String,
}
