//! Repository for the `councils` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::council::{Council, CreateCouncil};
use crate::models::filter::ListFilter;
use crate::repositories::Tx;

const COLUMNS: &str = "id, code, name, is_blocked, is_active, created_at, updated_at";

/// Provides CRUD and locking operations for councils.
pub struct CouncilRepo;

impl CouncilRepo {
    /// Insert a new, unlocked council.
    pub async fn create(pool: &PgPool, input: &CreateCouncil) -> Result<Council, sqlx::Error> {
        let query = format!(
            "INSERT INTO councils (code, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Council>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an active council by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Council>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM councils WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Council>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active councils filtered by name pattern and exact code.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Council>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM councils
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR code = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Council>(&query)
            .bind(&filter.pattern)
            .bind(&filter.code)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Lock an active council row with `SELECT ... FOR UPDATE`.
    ///
    /// Every composition, thesis and score write on a council takes this lock
    /// before reading its snapshot, so concurrent checks on one council
    /// serialize.
    pub async fn lock_for_update(tx: &mut Tx<'_>, id: DbId) -> Result<Option<Council>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM councils WHERE id = $1 AND is_active = true FOR UPDATE"
        );
        sqlx::query_as::<_, Council>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Write the lock flag and return the updated row.
    pub async fn set_blocked(
        tx: &mut Tx<'_>,
        id: DbId,
        is_blocked: bool,
    ) -> Result<Council, sqlx::Error> {
        let query = format!("UPDATE councils SET is_blocked = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Council>(&query)
            .bind(id)
            .bind(is_blocked)
            .fetch_one(&mut **tx)
            .await
    }

    /// Number of active role assignments and active theses owned by a council.
    pub async fn count_dependents(tx: &mut Tx<'_>, id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM council_details WHERE council_id = $1 AND is_active = true),
                (SELECT COUNT(*) FROM theses WHERE council_id = $1 AND is_active = true)",
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Soft-deactivate a council. Returns `true` if the row was updated.
    pub async fn deactivate(tx: &mut Tx<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE councils SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
