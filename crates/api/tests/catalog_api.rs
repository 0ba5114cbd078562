//! HTTP-level tests for the reference catalogs.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, build_test_app, create_user_with_token, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_department_list_filters(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "admin").await;
    let app = build_test_app(pool);

    for (code, name) in [("CSE", "Computer Science"), ("EEE", "Electrical Engineering")] {
        let response = post_json(
            app.clone(),
            "/api/v1/departments",
            json!({ "code": code, "name": name }),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.clone(), "/api/v1/departments?q=science", Some(&token)).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["code"], "CSE");

    let json = body_json(get(app.clone(), "/api/v1/departments?code=EEE", Some(&token)).await).await;
    assert_eq!(json["data"][0]["name"], "Electrical Engineering");

    let json = body_json(get(app, "/api/v1/departments?limit=1&offset=1", Some(&token)).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["code"], "EEE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_department_code_conflicts(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "admin").await;
    let app = build_test_app(pool);
    let body = json!({ "code": "CSE", "name": "Computer Science" });

    let response = post_json(app.clone(), "/api/v1/departments", body.clone(), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_json(app, "/api/v1/departments", body, Some(&token)).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_code_rejected(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "admin").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/majors",
        json!({ "code": "", "name": "Nameless" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_major_with_unknown_department_rejected(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "admin").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/majors",
        json!({ "code": "CS", "name": "Computer Science", "department_id": 999_999 }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_REFERENCE").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_study_period_must_span_four_years(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "admin").await;
    let (student_user, _) = create_user_with_token(&pool, "stud1", "student").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/majors",
        json!({ "code": "CS", "name": "Computer Science" }),
        Some(&token),
    )
    .await;
    let major_id = body_json(response).await["id"].as_i64().unwrap();

    let mut body = json!({
        "code": "S001",
        "name": "Student One",
        "major_id": major_id,
        "user_id": student_user,
        "start_study": "2021-09-01",
        "end_study": "2024-06-30",
    });
    let response = post_json(app.clone(), "/api/v1/students", body.clone(), Some(&token)).await;
    let json = assert_error(response, StatusCode::BAD_REQUEST, "STUDY_PERIOD_TOO_SHORT").await;
    assert_eq!(json["field"], "end_study");

    body["start_study"] = json!("2020-09-01");
    let response = post_json(app, "/api/v1/students", body, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_criteria_search_matches_title(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "staff", "ministry").await;
    let app = build_test_app(pool);

    for title in ["Content", "Presentation"] {
        let response = post_json(
            app.clone(),
            "/api/v1/criteria",
            json!({ "title": title }),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app, "/api/v1/criteria?q=present", Some(&token)).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Presentation");
    assert_eq!(data[0]["description"], "");
}
