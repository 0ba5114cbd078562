//! Repository for the `ministries` table.

use sqlx::PgPool;

use crate::models::filter::ListFilter;
use crate::models::ministry::{CreateMinistry, Ministry};

const COLUMNS: &str = "id, code, name, user_id, is_active, created_at, updated_at";

pub struct MinistryRepo;

impl MinistryRepo {
    /// Insert a new ministry staff record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMinistry) -> Result<Ministry, sqlx::Error> {
        let query = format!(
            "INSERT INTO ministries (code, name, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ministry>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Ministry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ministries
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Ministry>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
