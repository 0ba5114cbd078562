//! Repository for the `scores` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::score::{CreateScore, Score, ScoreReportRow, ScoreSnapshotRow};
use crate::repositories::Tx;

const COLUMNS: &str =
    "id, score, thesis_id, criteria_id, council_detail_id, is_active, created_at, updated_at";

/// Provides score persistence and the read models used by the scoring
/// workflow and report assembly.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Insert a validated score inside the caller's transaction.
    pub async fn create(tx: &mut Tx<'_>, input: &CreateScore) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores (score, thesis_id, criteria_id, council_detail_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(input.score)
            .bind(input.thesis_id)
            .bind(input.criteria_id)
            .bind(input.council_detail_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite value, thesis and criteria of a validated score.
    pub async fn update(
        tx: &mut Tx<'_>,
        id: DbId,
        score: f64,
        thesis_id: DbId,
        criteria_id: DbId,
    ) -> Result<Score, sqlx::Error> {
        let query = format!(
            "UPDATE scores SET score = $2, thesis_id = $3, criteria_id = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .bind(score)
            .bind(thesis_id)
            .bind(criteria_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an active score by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Score>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock an active score row for update.
    pub async fn lock_for_update(tx: &mut Tx<'_>, id: DbId) -> Result<Option<Score>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores WHERE id = $1 AND is_active = true FOR UPDATE"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List active scores filtered by thesis and criteria.
    pub async fn list(
        pool: &PgPool,
        thesis_id: Option<DbId>,
        criteria_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Score>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores
             WHERE is_active = true
               AND ($1::BIGINT IS NULL OR thesis_id = $1)
               AND ($2::BIGINT IS NULL OR criteria_id = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(thesis_id)
            .bind(criteria_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every active score of a thesis with the council of its grader.
    pub async fn snapshot_for_thesis(
        tx: &mut Tx<'_>,
        thesis_id: DbId,
    ) -> Result<Vec<ScoreSnapshotRow>, sqlx::Error> {
        sqlx::query_as::<_, ScoreSnapshotRow>(
            "SELECT s.id, s.score, s.criteria_id, s.council_detail_id, cd.council_id
             FROM scores s
             JOIN council_details cd ON cd.id = s.council_detail_id
             WHERE s.thesis_id = $1 AND s.is_active = true
             ORDER BY s.id",
        )
        .bind(thesis_id)
        .fetch_all(&mut **tx)
        .await
    }

    /// Scores of a thesis resolved to criteria title and lecturer name, in
    /// entry order.
    pub async fn report_rows(
        pool: &PgPool,
        thesis_id: DbId,
    ) -> Result<Vec<ScoreReportRow>, sqlx::Error> {
        sqlx::query_as::<_, ScoreReportRow>(
            "SELECT c.title AS criteria_title, COALESCE(l.name, '') AS lecturer_name, s.score
             FROM scores s
             JOIN criteria c ON c.id = s.criteria_id
             JOIN council_details cd ON cd.id = s.council_detail_id
             LEFT JOIN lecturers l ON l.id = cd.lecturer_id
             WHERE s.thesis_id = $1 AND s.is_active = true
             ORDER BY s.id",
        )
        .bind(thesis_id)
        .fetch_all(pool)
        .await
    }
}
