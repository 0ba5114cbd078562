//! Score entity model, DTOs and scoring snapshots.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub score: f64,
    pub thesis_id: DbId,
    pub criteria_id: DbId,
    pub council_detail_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for entering a score.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScore {
    pub score: f64,
    pub thesis_id: DbId,
    pub criteria_id: DbId,
    pub council_detail_id: DbId,
}

/// DTO for editing a score. The grading council member cannot change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScore {
    pub score: f64,
    pub thesis_id: Option<DbId>,
    pub criteria_id: Option<DbId>,
}

/// A score of one thesis with the council its grader belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreSnapshotRow {
    pub id: DbId,
    pub score: f64,
    pub criteria_id: DbId,
    pub council_detail_id: DbId,
    pub council_id: DbId,
}

/// A score resolved to display names for report assembly.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreReportRow {
    pub criteria_title: String,
    pub lecturer_name: String,
    pub score: f64,
}
