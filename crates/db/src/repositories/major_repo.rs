//! Repository for the `majors` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::filter::ListFilter;
use crate::models::major::{CreateMajor, Major};

const COLUMNS: &str = "id, code, name, department_id, is_active, created_at, updated_at";

/// Provides create and lookup operations for majors.
pub struct MajorRepo;

impl MajorRepo {
    /// Insert a new major, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMajor) -> Result<Major, sqlx::Error> {
        let query = format!(
            "INSERT INTO majors (code, name, department_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Major>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.department_id)
            .fetch_one(pool)
            .await
    }

    /// Find an active major by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Major>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM majors WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Major>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active majors filtered by name pattern and exact code.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Major>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM majors
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Major>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
