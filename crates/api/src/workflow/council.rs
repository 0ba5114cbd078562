use serde::Serialize;
use thesis_core::council::{
    ensure_unlocked, is_council_fully_scored, plan_lock_toggle,
    validate_council_detail_assignment, Assignment, CouncilRole,
};
use thesis_core::error::CoreError;
use thesis_core::types::DbId;
use thesis_db::models::council::Council;
use thesis_db::models::council_detail::{CouncilDetail, CreateCouncilDetail};
use thesis_db::repositories::{CouncilDetailRepo, CouncilRepo, LecturerRepo, ThesisRepo, Tx};
use thesis_events::{event_types, DomainEvent};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Whether a council may be locked right now.
#[derive(Debug, Clone, Serialize)]
pub struct CouncilStatus {
    pub council_id: DbId,
    pub is_blocked: bool,
    pub is_fully_scored: bool,
    pub thesis_count: usize,
    /// Theses whose total is still zero.
    pub unscored_thesis_ids: Vec<DbId>,
}

async fn lock_council(tx: &mut Tx<'_>, council_id: DbId) -> AppResult<Council> {
    CouncilRepo::lock_for_update(tx, council_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Council",
            id: council_id,
        }))
}

fn to_assignments(details: &[CouncilDetail]) -> AppResult<Vec<Assignment>> {
    details
        .iter()
        .map(|d| {
            let role = CouncilRole::from_str_value(&d.role).map_err(AppError::InternalError)?;
            Ok(Assignment {
                role,
                lecturer_id: d.lecturer_id,
            })
        })
        .collect()
}

/// Give a lecturer a role in a council.
///
/// Rejects locked councils, then applies the composition rules against the
/// council's current assignments. On success publishes
/// [`event_types::COUNCIL_MEMBER_ASSIGNED`] for the notification router.
pub async fn assign_member(
    state: &AppState,
    input: &CreateCouncilDetail,
    actor_user_id: DbId,
) -> AppResult<CouncilDetail> {
    let role = CouncilRole::from_str_value(&input.role).map_err(CoreError::Validation)?;

    let mut tx = state.pool.begin().await?;

    let council = lock_council(&mut tx, input.council_id).await?;
    ensure_unlocked(council.id, council.is_blocked)?;

    LecturerRepo::lock_for_update(&mut tx, input.lecturer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lecturer",
            id: input.lecturer_id,
        }))?;

    let existing = CouncilDetailRepo::list_for_council(&mut tx, council.id).await?;
    validate_council_detail_assignment(&to_assignments(&existing)?, role, input.lecturer_id)?;

    let detail = CouncilDetailRepo::create(
        &mut tx,
        &CreateCouncilDetail {
            role: role.as_str().to_string(),
            lecturer_id: input.lecturer_id,
            council_id: council.id,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        council_id = council.id,
        lecturer_id = detail.lecturer_id,
        role = %role,
        council_detail_id = detail.id,
        "Lecturer assigned to council",
    );

    state.event_bus.publish(
        DomainEvent::new(event_types::COUNCIL_MEMBER_ASSIGNED)
            .with_entity("council_detail", detail.id)
            .with_actor(actor_user_id)
            .with_payload(serde_json::json!({
                "council_id": council.id,
                "lecturer_id": detail.lecturer_id,
                "role": role.as_str(),
            })),
    );

    Ok(detail)
}

/// Flip a council's lock.
///
/// Locking requires every owned thesis to have a positive total; unlocking
/// always succeeds. The flag is written only after validation passes.
pub async fn toggle_lock(
    state: &AppState,
    council_id: DbId,
    actor_user_id: DbId,
) -> AppResult<Council> {
    let mut tx = state.pool.begin().await?;

    let council = lock_council(&mut tx, council_id).await?;
    let totals = ThesisRepo::totals_for_council(&mut *tx, council.id).await?;

    let next = match plan_lock_toggle(council.is_blocked, &totals) {
        Ok(next) => next,
        Err(violation) => {
            tracing::warn!(council_id, error = %violation, "Council lock rejected");
            return Err(violation.into());
        }
    };

    let updated = CouncilRepo::set_blocked(&mut tx, council.id, next).await?;
    tx.commit().await?;

    tracing::info!(council_id, is_blocked = next, "Council lock toggled");

    state.event_bus.publish(
        DomainEvent::new(event_types::COUNCIL_LOCK_CHANGED)
            .with_entity("council", council.id)
            .with_actor(actor_user_id)
            .with_payload(serde_json::json!({ "is_blocked": next })),
    );

    Ok(updated)
}

/// Report whether every thesis of a council has been scored.
pub async fn status(state: &AppState, council_id: DbId) -> AppResult<CouncilStatus> {
    let council = CouncilRepo::find_by_id(&state.pool, council_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Council",
            id: council_id,
        }))?;

    let totals = ThesisRepo::totals_for_council(&state.pool, council.id).await?;
    let scores: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();

    Ok(CouncilStatus {
        council_id: council.id,
        is_blocked: council.is_blocked,
        is_fully_scored: is_council_fully_scored(&scores),
        thesis_count: totals.len(),
        unscored_thesis_ids: totals
            .iter()
            .filter(|(_, total)| *total <= 0.0)
            .map(|(id, _)| *id)
            .collect(),
    })
}

/// Deactivate a council that no longer has active members or theses.
pub async fn deactivate(state: &AppState, council_id: DbId) -> AppResult<()> {
    let mut tx = state.pool.begin().await?;

    let council = lock_council(&mut tx, council_id).await?;
    let (members, theses) = CouncilRepo::count_dependents(&mut tx, council.id).await?;
    if members > 0 || theses > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Council {council_id} still has {members} member(s) and {theses} thesis(es)"
        ))));
    }

    CouncilRepo::deactivate(&mut tx, council.id).await?;
    tx.commit().await?;

    tracing::info!(council_id, "Council deactivated");
    Ok(())
}

/// Deactivate a lecturer who holds no active council role and advises no
/// active thesis.
pub async fn deactivate_lecturer(state: &AppState, lecturer_id: DbId) -> AppResult<()> {
    let mut tx = state.pool.begin().await?;

    LecturerRepo::lock_for_update(&mut tx, lecturer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lecturer",
            id: lecturer_id,
        }))?;

    let (roles, advised) = LecturerRepo::count_active_dependents(&mut tx, lecturer_id).await?;
    if roles > 0 || advised > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Lecturer {lecturer_id} still holds {roles} council role(s) and advises {advised} thesis(es)"
        ))));
    }

    LecturerRepo::deactivate(&mut tx, lecturer_id).await?;
    tx.commit().await?;

    tracing::info!(lecturer_id, "Lecturer deactivated");
    Ok(())
}
