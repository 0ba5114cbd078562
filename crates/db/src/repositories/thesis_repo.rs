//! Repository for the `theses` table and its participant junctions.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::filter::ListFilter;
use crate::models::thesis::{CreateThesis, Thesis, ThesisTotalScore, ThesisWithParticipants};
use crate::repositories::Tx;

const COLUMNS: &str =
    "id, title, report_text, total_score, council_id, is_active, created_at, updated_at";

/// Per-major thesis count row, one per (major) after grouping.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MajorTallyRow {
    pub major_code: String,
    pub major_name: String,
    pub count: i64,
}

/// Provides CRUD, aggregation and statistics queries for theses.
pub struct ThesisRepo;

impl ThesisRepo {
    /// Insert a thesis and its advisor/student junction rows inside the
    /// caller's transaction.
    ///
    /// The caller must hold the council row lock and have checked capacity.
    pub async fn create(tx: &mut Tx<'_>, input: &CreateThesis) -> Result<Thesis, sqlx::Error> {
        let query = format!(
            "INSERT INTO theses (title, report_text, council_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let thesis = sqlx::query_as::<_, Thesis>(&query)
            .bind(&input.title)
            .bind(&input.report_text)
            .bind(input.council_id)
            .fetch_one(&mut **tx)
            .await?;

        for &lecturer_id in &input.advisors {
            sqlx::query("INSERT INTO thesis_advisors (thesis_id, lecturer_id) VALUES ($1, $2)")
                .bind(thesis.id)
                .bind(lecturer_id)
                .execute(&mut **tx)
                .await?;
        }
        for &student_id in &input.students {
            sqlx::query("INSERT INTO thesis_students (thesis_id, student_id) VALUES ($1, $2)")
                .bind(thesis.id)
                .bind(student_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(thesis)
    }

    /// Find an active thesis by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Thesis>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM theses WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Thesis>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active thesis by ID inside a transaction.
    pub async fn find_by_id_tx(tx: &mut Tx<'_>, id: DbId) -> Result<Option<Thesis>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM theses WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Thesis>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find a thesis enriched with its advisor and student ids.
    pub async fn find_with_participants(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ThesisWithParticipants>, sqlx::Error> {
        let Some(thesis) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let advisors: Vec<DbId> = sqlx::query_scalar(
            "SELECT lecturer_id FROM thesis_advisors WHERE thesis_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        let students: Vec<DbId> = sqlx::query_scalar(
            "SELECT student_id FROM thesis_students WHERE thesis_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(Some(ThesisWithParticipants {
            thesis,
            advisors,
            students,
        }))
    }

    /// List active theses, optionally filtered by title pattern and council.
    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
        council_id: Option<DbId>,
    ) -> Result<Vec<Thesis>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM theses
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR title ILIKE $1)
               AND ($2::BIGINT IS NULL OR council_id = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Thesis>(&query)
            .bind(&filter.pattern)
            .bind(council_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// `(thesis_id, total_score)` of every active thesis owned by a council.
    ///
    /// Accepts a pool or an open transaction (`&mut **tx`).
    pub async fn totals_for_council<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        council_id: DbId,
    ) -> Result<Vec<(DbId, f64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, total_score FROM theses
             WHERE council_id = $1 AND is_active = true
             ORDER BY id",
        )
        .bind(council_id)
        .fetch_all(executor)
        .await
    }

    /// Persist a recomputed total.
    pub async fn set_total_score(
        tx: &mut Tx<'_>,
        id: DbId,
        total_score: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE theses SET total_score = $2 WHERE id = $1")
            .bind(id)
            .bind(total_score)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Active theses created in `year` (all years when `None`), oldest first.
    pub async fn list_total_scores(
        pool: &PgPool,
        year: Option<i32>,
    ) -> Result<Vec<ThesisTotalScore>, sqlx::Error> {
        sqlx::query_as::<_, ThesisTotalScore>(
            "SELECT id, title, total_score, created_at FROM theses
             WHERE is_active = true
               AND ($1::INT IS NULL OR EXTRACT(YEAR FROM created_at)::INT = $1)
             ORDER BY created_at, id",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }

    /// Distinct creation years of active theses, ascending.
    pub async fn distinct_years(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT EXTRACT(YEAR FROM created_at)::INT AS year
             FROM theses
             WHERE is_active = true
             ORDER BY year",
        )
        .fetch_all(pool)
        .await
    }

    /// Thesis counts grouped by each student's major.
    ///
    /// One count per (thesis, student) pair, so a thesis with two students of
    /// the same major counts twice. Theses without students do not appear.
    pub async fn major_tallies(
        pool: &PgPool,
        year: Option<i32>,
    ) -> Result<Vec<MajorTallyRow>, sqlx::Error> {
        sqlx::query_as::<_, MajorTallyRow>(
            "SELECT m.code AS major_code, m.name AS major_name, COUNT(*) AS count
             FROM theses t
             JOIN thesis_students ts ON ts.thesis_id = t.id
             JOIN students s ON s.id = ts.student_id
             JOIN majors m ON m.id = s.major_id
             WHERE t.is_active = true
               AND ($1::INT IS NULL OR EXTRACT(YEAR FROM t.created_at)::INT = $1)
             GROUP BY m.id, m.code, m.name",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }
}
