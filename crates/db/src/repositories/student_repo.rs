//! Repository for the `students` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::filter::ListFilter;
use crate::models::student::{CreateStudent, Student};
use crate::repositories::Tx;

const COLUMNS: &str = "id, code, name, major_id, user_id, start_study, end_study, \
                       is_active, created_at, updated_at";

/// Provides create and lookup operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (code, name, major_id, user_id, start_study, end_study)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.major_id)
            .bind(input.user_id)
            .bind(input.start_study)
            .bind(input.end_study)
            .fetch_one(pool)
            .await
    }

    /// Find an active student by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Share-lock the active students among `ids`, returning the IDs found.
    pub async fn lock_active_ids(tx: &mut Tx<'_>, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM students
             WHERE id = ANY($1) AND is_active = true
             ORDER BY id
             FOR SHARE",
        )
        .bind(ids)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List active students filtered by name pattern and exact code.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
