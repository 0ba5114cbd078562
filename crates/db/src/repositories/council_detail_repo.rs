//! Repository for the `council_details` table.

use sqlx::PgPool;
use thesis_core::types::DbId;

use crate::models::council_detail::{CouncilDetail, CouncilMember, CreateCouncilDetail};
use crate::repositories::Tx;

const COLUMNS: &str = "id, role, lecturer_id, council_id, is_active, created_at, updated_at";

/// Provides operations for council role assignments.
pub struct CouncilDetailRepo;

impl CouncilDetailRepo {
    /// Insert an assignment inside the caller's transaction.
    ///
    /// The caller must hold the council row lock and have validated the
    /// assignment against [`Self::list_for_council`].
    pub async fn create(
        tx: &mut Tx<'_>,
        input: &CreateCouncilDetail,
    ) -> Result<CouncilDetail, sqlx::Error> {
        let query = format!(
            "INSERT INTO council_details (role, lecturer_id, council_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CouncilDetail>(&query)
            .bind(&input.role)
            .bind(input.lecturer_id)
            .bind(input.council_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an active assignment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CouncilDetail>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM council_details WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, CouncilDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active assignment by ID inside a transaction.
    pub async fn find_by_id_tx(
        tx: &mut Tx<'_>,
        id: DbId,
    ) -> Result<Option<CouncilDetail>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM council_details WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, CouncilDetail>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Active assignments of one council, the snapshot the composition
    /// rules run against.
    pub async fn list_for_council(
        tx: &mut Tx<'_>,
        council_id: DbId,
    ) -> Result<Vec<CouncilDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM council_details
             WHERE council_id = $1 AND is_active = true
             ORDER BY id"
        );
        sqlx::query_as::<_, CouncilDetail>(&query)
            .bind(council_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// List active assignments, optionally restricted to one council.
    pub async fn list(
        pool: &PgPool,
        council_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CouncilDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM council_details
             WHERE is_active = true
               AND ($1::BIGINT IS NULL OR council_id = $1)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CouncilDetail>(&query)
            .bind(council_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Members of a council with lecturer names, in assignment order.
    pub async fn list_members(
        pool: &PgPool,
        council_id: DbId,
    ) -> Result<Vec<CouncilMember>, sqlx::Error> {
        sqlx::query_as::<_, CouncilMember>(
            "SELECT cd.id, cd.role, cd.lecturer_id, l.name AS lecturer_name
             FROM council_details cd
             JOIN lecturers l ON l.id = cd.lecturer_id
             WHERE cd.council_id = $1 AND cd.is_active = true
             ORDER BY cd.id",
        )
        .bind(council_id)
        .fetch_all(pool)
        .await
    }
}
