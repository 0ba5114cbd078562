use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thesis_core::error::CoreError;
use thesis_core::rules::ViolationKind;

use crate::report::ReportError;

/// Unique constraint guarding the (thesis, criteria, council detail) score key.
const SCORE_KEY_CONSTRAINT: &str = "uq_scores_thesis_criteria_council_detail";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{"error": ..., "code": ..., "field": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `thesis_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Rendering or storing an exported report failed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// No route matches the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<thesis_core::rules::RuleViolation> for AppError {
    fn from(violation: thesis_core::rules::RuleViolation) -> Self {
        AppError::Core(CoreError::Rule(violation))
    }
}

/// Status, machine code, message and optional offending field.
type Classified = (StatusCode, &'static str, String, Option<&'static str>);

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Rule(violation) => {
                    let status = match violation.kind() {
                        ViolationKind::ValidationFailure => StatusCode::BAD_REQUEST,
                        ViolationKind::StateConflict => StatusCode::CONFLICT,
                    };
                    (
                        status,
                        violation.code(),
                        violation.to_string(),
                        Some(violation.field()),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Report(err) => {
                tracing::error!(error = %err, "Report export failed");
                internal()
            }

            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
                None,
            ),

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, message and field.
///
/// - `RowNotFound` maps to 404.
/// - The score key constraint maps to 409 `DUPLICATE_SCORE_ENTRY`, the same
///   outcome as the rule check it backs.
/// - Other unique constraints (name starting with `uq_`) map to 409.
/// - Foreign key violations (23503) map to 400: the request referenced a row
///   that does not exist.
/// - Check violations (23514) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint == SCORE_KEY_CONSTRAINT => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_SCORE_ENTRY",
                    "A score for this thesis, criteria and council member already exists"
                        .to_string(),
                    Some("non_field_errors"),
                ),
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                    None,
                ),
                Some("23503") => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced record does not exist ({constraint})"),
                    None,
                ),
                Some("23514") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                    None,
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
