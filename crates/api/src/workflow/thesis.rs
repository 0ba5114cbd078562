use thesis_core::council::{ensure_unlocked, validate_thesis_capacity};
use thesis_core::error::CoreError;
use thesis_core::thesis::validate_participants;
use thesis_core::types::DbId;
use thesis_db::models::thesis::{CreateThesis, Thesis};
use thesis_db::repositories::{CouncilRepo, LecturerRepo, StudentRepo, ThesisRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fail with `NotFound` for the first requested ID absent from `found`.
fn ensure_all_found(entity: &'static str, requested: &[DbId], found: &[DbId]) -> AppResult<()> {
    match requested.iter().find(|id| !found.contains(id)) {
        Some(&id) => Err(AppError::Core(CoreError::NotFound { entity, id })),
        None => Ok(()),
    }
}

/// Register a thesis with its advisors and students under a council.
///
/// A locked council accepts no new theses, since an unscored thesis would
/// invalidate its lock.
pub async fn register(state: &AppState, input: &CreateThesis) -> AppResult<Thesis> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    validate_participants(&input.advisors, &input.students)?;

    let mut tx = state.pool.begin().await?;

    let council = CouncilRepo::lock_for_update(&mut tx, input.council_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Council",
            id: input.council_id,
        }))?;
    ensure_unlocked(council.id, council.is_blocked)?;

    let current = ThesisRepo::totals_for_council(&mut *tx, council.id).await?;
    validate_thesis_capacity(current.len())?;

    let advisors = LecturerRepo::lock_active_ids(&mut tx, &input.advisors).await?;
    ensure_all_found("Lecturer", &input.advisors, &advisors)?;
    let students = StudentRepo::lock_active_ids(&mut tx, &input.students).await?;
    ensure_all_found("Student", &input.students, &students)?;

    let thesis = ThesisRepo::create(&mut tx, input).await?;
    tx.commit().await?;

    tracing::info!(
        thesis_id = thesis.id,
        council_id = council.id,
        advisors = input.advisors.len(),
        students = input.students.len(),
        "Thesis registered",
    );
    Ok(thesis)
}
