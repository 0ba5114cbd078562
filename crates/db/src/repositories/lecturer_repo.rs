//! Repository for the `lecturers` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::filter::ListFilter;
use crate::models::lecturer::{CreateLecturer, Lecturer, LecturerContact};
use crate::repositories::Tx;

const COLUMNS: &str = "id, code, name, user_id, department_id, is_active, created_at, updated_at";

/// Provides CRUD operations for lecturers.
pub struct LecturerRepo;

impl LecturerRepo {
    /// Insert a new lecturer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLecturer) -> Result<Lecturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO lecturers (code, name, user_id, department_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.user_id)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find an active lecturer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lecturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lecturers WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active lecturers filtered by name pattern and exact code.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Lecturer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lecturers
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Lock an active lecturer row for the rest of the transaction.
    ///
    /// Assignment and deactivation both take this lock, so a lecturer cannot
    /// be deactivated while a new role is being given to them.
    pub async fn lock_for_update(tx: &mut Tx<'_>, id: DbId) -> Result<Option<Lecturer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lecturers WHERE id = $1 AND is_active = true FOR UPDATE"
        );
        sqlx::query_as::<_, Lecturer>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Active council roles and active advised theses of a lecturer.
    pub async fn count_active_dependents(
        tx: &mut Tx<'_>,
        id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM council_details
                 WHERE lecturer_id = $1 AND is_active = true),
                (SELECT COUNT(*) FROM thesis_advisors ta
                 JOIN theses t ON t.id = ta.thesis_id
                 WHERE ta.lecturer_id = $1 AND t.is_active = true)",
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Share-lock the active lecturers among `ids`, returning the IDs found.
    ///
    /// Conflicts with [`LecturerRepo::lock_for_update`], so a lecturer being
    /// attached to a thesis cannot be deactivated concurrently.
    pub async fn lock_active_ids(tx: &mut Tx<'_>, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM lecturers
             WHERE id = ANY($1) AND is_active = true
             ORDER BY id
             FOR SHARE",
        )
        .bind(ids)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Soft-deactivate a lecturer. Returns `true` if the row was updated.
    pub async fn deactivate(tx: &mut Tx<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE lecturers SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve the lecturer's name and the email of the linked user.
    pub async fn find_contact(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LecturerContact>, sqlx::Error> {
        sqlx::query_as::<_, LecturerContact>(
            "SELECT l.id AS lecturer_id, l.name, u.email
             FROM lecturers l
             JOIN users u ON u.id = l.user_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
