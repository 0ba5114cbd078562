//! Handlers for the `/theses` resource, including score reports and
//! dashboard statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use thesis_core::error::CoreError;
use thesis_core::report::{build_score_report, report_file_name, ReportEntry, ScoreReport};
use thesis_core::stats::{thesis_counts_by_major, MajorShare, MajorTally};
use thesis_core::types::DbId;
use thesis_db::models::thesis::{CreateThesis, Thesis, ThesisTotalScore, ThesisWithParticipants};
use thesis_db::repositories::{ScoreRepo, ThesisRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::{ThesisListParams, YearParams};
use crate::report::{CsvRenderer, ReportRenderer};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `GET /theses/total-score`.
#[derive(Debug, Serialize)]
pub struct TotalScoreResponse {
    pub year: Option<i32>,
    /// Every year that has at least one thesis, for the year picker.
    pub years: Vec<i32>,
    pub theses: Vec<ThesisTotalScore>,
}

/// Response for `GET /theses/stats/by-major`.
#[derive(Debug, Serialize)]
pub struct MajorStatsResponse {
    pub year: Option<i32>,
    pub majors: Vec<MajorShare>,
}

#[derive(Debug, Serialize)]
pub struct ThesisReportResponse {
    pub thesis_id: DbId,
    pub title: String,
    pub report: ScoreReport,
}

/// Where an exported report was written.
#[derive(Debug, Serialize)]
pub struct ReportExportResponse {
    pub file_name: String,
    pub path: String,
    pub content_type: &'static str,
    pub size: usize,
}

fn thesis_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Thesis",
        id,
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/theses
pub async fn list_theses(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<ThesisListParams>,
) -> AppResult<Json<DataResponse<Vec<Thesis>>>> {
    let theses = ThesisRepo::list(&state.pool, &params.to_filter(), params.council_id).await?;
    Ok(Json(DataResponse { data: theses }))
}

/// POST /api/v1/theses
pub async fn create_thesis(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateThesis>,
) -> AppResult<(StatusCode, Json<Thesis>)> {
    let thesis = workflow::thesis::register(&state, &input).await?;
    Ok((StatusCode::CREATED, Json(thesis)))
}

/// GET /api/v1/theses/{id}
pub async fn get_thesis(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ThesisWithParticipants>> {
    let thesis = ThesisRepo::find_with_participants(&state.pool, id)
        .await?
        .ok_or_else(|| thesis_not_found(id))?;
    Ok(Json(thesis))
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// GET /api/v1/theses/total-score?year=
pub async fn total_scores(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<YearParams>,
) -> AppResult<Json<TotalScoreResponse>> {
    let theses = ThesisRepo::list_total_scores(&state.pool, params.year).await?;
    let years = ThesisRepo::distinct_years(&state.pool).await?;
    Ok(Json(TotalScoreResponse {
        year: params.year,
        years,
        theses,
    }))
}

/// GET /api/v1/theses/stats/by-major?year=
///
/// Counts one per (thesis, student) pair, so a thesis with two students of
/// the same major counts twice for that major.
pub async fn stats_by_major(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Query(params): Query<YearParams>,
) -> AppResult<Json<MajorStatsResponse>> {
    let tallies = ThesisRepo::major_tallies(&state.pool, params.year)
        .await?
        .into_iter()
        .map(|row| MajorTally {
            major_code: row.major_code,
            major_name: row.major_name,
            count: row.count,
        })
        .collect();

    Ok(Json(MajorStatsResponse {
        year: params.year,
        majors: thesis_counts_by_major(tallies),
    }))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

async fn assemble_report(state: &AppState, id: DbId) -> AppResult<(Thesis, ScoreReport)> {
    let thesis = ThesisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| thesis_not_found(id))?;

    let entries: Vec<ReportEntry> = ScoreRepo::report_rows(&state.pool, id)
        .await?
        .into_iter()
        .map(|row| ReportEntry {
            criteria_title: row.criteria_title,
            lecturer_name: row.lecturer_name,
            score: row.score,
        })
        .collect();

    Ok((thesis, build_score_report(&entries)))
}

/// GET /api/v1/theses/{id}/report
pub async fn get_report(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ThesisReportResponse>> {
    let (thesis, report) = assemble_report(&state, id).await?;
    Ok(Json(ThesisReportResponse {
        thesis_id: thesis.id,
        title: thesis.title,
        report,
    }))
}

/// POST /api/v1/theses/{id}/report/export
///
/// Render the report as CSV and write it to the reports directory under
/// `Thesis report {title}.csv`. Re-exporting overwrites the previous file.
pub async fn export_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ReportExportResponse>)> {
    let (thesis, report) = assemble_report(&state, id).await?;

    let renderer = CsvRenderer;
    let bytes = renderer.render(&thesis.title, &report)?;
    let file_name = report_file_name(&thesis.title, renderer.extension());
    let path = state.report_store.put(&file_name, &bytes).await?;

    tracing::info!(
        thesis_id = thesis.id,
        path = %path.display(),
        size = bytes.len(),
        requested_by = auth.user_id,
        "Score report exported",
    );

    Ok((
        StatusCode::CREATED,
        Json(ReportExportResponse {
            file_name,
            path: path.display().to_string(),
            content_type: renderer.content_type(),
            size: bytes.len(),
        }),
    ))
}
