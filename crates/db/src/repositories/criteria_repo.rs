//! Repository for the `criteria` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::criteria::{CreateCriteria, Criteria};
use crate::models::filter::ListFilter;

const COLUMNS: &str = "id, title, description, is_active, created_at, updated_at";

/// Provides create and lookup operations for grading criteria.
pub struct CriteriaRepo;

impl CriteriaRepo {
    /// Insert a new criterion, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCriteria) -> Result<Criteria, sqlx::Error> {
        let query = format!(
            "INSERT INTO criteria (title, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Criteria>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find an active criterion by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Criteria>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM criteria WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Criteria>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active criteria filtered by title pattern. Criteria have no code,
    /// so `filter.code` is ignored.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Criteria>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM criteria
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR title ILIKE $1)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Criteria>(&query)
            .bind(&filter.pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
