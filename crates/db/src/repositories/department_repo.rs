//! Repository for the `departments` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::department::{CreateDepartment, Department};
use crate::models::filter::ListFilter;

const COLUMNS: &str = "id, code, name, is_active, created_at, updated_at";

/// Provides create and lookup operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (code, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an active department by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM departments WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active departments filtered by name pattern and exact code.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }
}
