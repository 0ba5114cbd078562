//! Thesis entity model, DTOs and read models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};

/// A row from the `theses` table.
///
/// `total_score` is derived from the thesis's scores and is only written by
/// the score workflows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Thesis {
    pub id: DbId,
    pub title: String,
    pub report_text: String,
    pub total_score: f64,
    pub council_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a thesis together with its advisors and students.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateThesis {
    pub title: String,
    #[serde(default)]
    pub report_text: String,
    pub council_id: DbId,
    pub advisors: Vec<DbId>,
    pub students: Vec<DbId>,
}

/// A thesis with its participant ids.
#[derive(Debug, Clone, Serialize)]
pub struct ThesisWithParticipants {
    #[serde(flatten)]
    pub thesis: Thesis,
    pub advisors: Vec<DbId>,
    pub students: Vec<DbId>,
}

/// Row of the year-filtered total score listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ThesisTotalScore {
    pub id: DbId,
    pub title: String,
    pub total_score: f64,
    pub created_at: Timestamp,
}
