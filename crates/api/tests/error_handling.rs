//! Error-to-response mapping, exercised without a database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use thesis_api::error::AppError;
use thesis_api::report::ReportError;
use thesis_core::council::CouncilRole;
use thesis_core::error::CoreError;
use thesis_core::rules::RuleViolation;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_is_404() {
    let (status, json) = render(AppError::Core(CoreError::NotFound {
        entity: "Council",
        id: 9,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Council with id 9 not found");
    assert!(json.get("field").is_none());
}

#[tokio::test]
async fn validation_rule_is_400_with_field() {
    let (status, json) = render(RuleViolation::RoleAlreadyAssigned {
        role: CouncilRole::Chairman,
    }
    .into())
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ROLE_ALREADY_ASSIGNED");
    assert_eq!(json["field"], "role");
}

#[tokio::test]
async fn state_conflict_rule_is_409() {
    let (status, json) = render(RuleViolation::CouncilLocked { council_id: 3 }.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "COUNCIL_LOCKED");
    assert_eq!(json["field"], "is_blocked");
}

#[tokio::test]
async fn duplicate_score_rule_uses_non_field_errors() {
    let (status, json) = render(RuleViolation::DuplicateScoreEntry.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "non_field_errors");
}

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, _) = render(AppError::Core(CoreError::Unauthorized("no".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = render(AppError::Core(CoreError::Forbidden("no".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn row_not_found_is_404() {
    let (status, json) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) = render(AppError::InternalError("secret detail".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) = render(AppError::Report(ReportError::InvalidName("../x".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}
