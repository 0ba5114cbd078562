use thesis_core::aggregation::{compute_thesis_total, GradedScore};
use thesis_core::error::CoreError;
use thesis_core::scoring::{validate_score_write, ExistingScore, ScoreWrite};
use thesis_core::types::DbId;
use thesis_db::models::council::Council;
use thesis_db::models::score::{CreateScore, Score, ScoreSnapshotRow, UpdateScore};
use thesis_db::models::thesis::Thesis;
use thesis_db::repositories::{
    CouncilDetailRepo, CouncilRepo, CriteriaRepo, ScoreRepo, ThesisRepo, Tx,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn existing_scores(rows: &[ScoreSnapshotRow]) -> Vec<ExistingScore> {
    rows.iter()
        .map(|r| ExistingScore {
            id: r.id,
            criteria_id: r.criteria_id,
            council_detail_id: r.council_detail_id,
            council_id: r.council_id,
        })
        .collect()
}

/// Recompute and persist a thesis total from its current scores.
///
/// Idempotent: calling it twice without intervening writes stores the same
/// value.
pub async fn recompute_thesis_total(
    tx: &mut Tx<'_>,
    thesis_id: DbId,
    state: &AppState,
) -> AppResult<f64> {
    let rows = ScoreRepo::snapshot_for_thesis(tx, thesis_id).await?;
    let graded: Vec<GradedScore> = rows
        .iter()
        .map(|r| GradedScore {
            council_detail_id: r.council_detail_id,
            value: r.score,
        })
        .collect();

    let total = compute_thesis_total(&graded, state.config.total_score_method);
    ThesisRepo::set_total_score(tx, thesis_id, total).await?;

    tracing::debug!(
        thesis_id,
        total,
        method = state.config.total_score_method.as_str(),
        scores = graded.len(),
        "Thesis total recomputed",
    );
    Ok(total)
}

/// Load the grader's council under lock and the target thesis.
async fn load_context(
    tx: &mut Tx<'_>,
    council_detail_id: DbId,
    thesis_id: DbId,
) -> AppResult<(Council, Thesis)> {
    let detail = CouncilDetailRepo::find_by_id_tx(tx, council_detail_id)
        .await?
        .ok_or_else(|| not_found("CouncilDetail", council_detail_id))?;

    let council = CouncilRepo::lock_for_update(tx, detail.council_id)
        .await?
        .ok_or_else(|| not_found("Council", detail.council_id))?;

    let thesis = ThesisRepo::find_by_id_tx(tx, thesis_id)
        .await?
        .ok_or_else(|| not_found("Thesis", thesis_id))?;

    Ok((council, thesis))
}

/// Enter a new score and refresh the thesis total in the same transaction.
pub async fn record(
    state: &AppState,
    input: &CreateScore,
    actor_user_id: DbId,
) -> AppResult<Score> {
    CriteriaRepo::find_by_id(&state.pool, input.criteria_id)
        .await?
        .ok_or_else(|| not_found("Criteria", input.criteria_id))?;

    let mut tx = state.pool.begin().await?;
    let (council, thesis) = load_context(&mut tx, input.council_detail_id, input.thesis_id).await?;

    let snapshot = ScoreRepo::snapshot_for_thesis(&mut tx, thesis.id).await?;
    validate_score_write(
        &ScoreWrite {
            record_id: None,
            thesis_id: thesis.id,
            criteria_id: input.criteria_id,
            council_detail_id: input.council_detail_id,
            council_id: council.id,
            council_is_blocked: council.is_blocked,
            thesis_council_id: thesis.council_id,
            value: input.score,
        },
        &existing_scores(&snapshot),
    )?;

    let score = ScoreRepo::create(&mut tx, input).await?;
    let total = recompute_thesis_total(&mut tx, thesis.id, state).await?;
    tx.commit().await?;

    tracing::info!(
        score_id = score.id,
        thesis_id = thesis.id,
        council_id = council.id,
        total,
        actor_user_id,
        "Score recorded",
    );
    Ok(score)
}

/// Edit a score's value and optionally move it to another thesis or
/// criterion. The grading council member never changes.
///
/// Both the old and the new thesis totals are refreshed when the thesis
/// changes.
pub async fn update(
    state: &AppState,
    score_id: DbId,
    input: &UpdateScore,
    actor_user_id: DbId,
) -> AppResult<Score> {
    let current = ScoreRepo::find_by_id(&state.pool, score_id)
        .await?
        .ok_or_else(|| not_found("Score", score_id))?;

    let thesis_id = input.thesis_id.unwrap_or(current.thesis_id);
    let criteria_id = input.criteria_id.unwrap_or(current.criteria_id);
    if criteria_id != current.criteria_id {
        CriteriaRepo::find_by_id(&state.pool, criteria_id)
            .await?
            .ok_or_else(|| not_found("Criteria", criteria_id))?;
    }

    let mut tx = state.pool.begin().await?;
    let (council, thesis) = load_context(&mut tx, current.council_detail_id, thesis_id).await?;

    // Re-read under the council lock; the row may have changed meanwhile.
    let locked = ScoreRepo::lock_for_update(&mut tx, score_id)
        .await?
        .ok_or_else(|| not_found("Score", score_id))?;

    let snapshot = ScoreRepo::snapshot_for_thesis(&mut tx, thesis.id).await?;
    validate_score_write(
        &ScoreWrite {
            record_id: Some(locked.id),
            thesis_id: thesis.id,
            criteria_id,
            council_detail_id: locked.council_detail_id,
            council_id: council.id,
            council_is_blocked: council.is_blocked,
            thesis_council_id: thesis.council_id,
            value: input.score,
        },
        &existing_scores(&snapshot),
    )?;

    let score = ScoreRepo::update(&mut tx, locked.id, input.score, thesis.id, criteria_id).await?;
    let total = recompute_thesis_total(&mut tx, thesis.id, state).await?;
    if locked.thesis_id != thesis.id {
        recompute_thesis_total(&mut tx, locked.thesis_id, state).await?;
    }
    tx.commit().await?;

    tracing::info!(
        score_id,
        thesis_id = thesis.id,
        previous_thesis_id = locked.thesis_id,
        total,
        actor_user_id,
        "Score updated",
    );
    Ok(score)
}
