//! HTTP-level tests for login, role checks and the user endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, create_user_with_token, get, patch_json, post_json,
    put_json, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user_id, _) = create_user_with_token(&pool, "ministry1", "ministry").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "ministry1", "password": TEST_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user_id);
    assert_eq!(json["user"]["role"], "ministry");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_user_with_token(&pool, "ministry1", "ministry").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "ministry1", "password": "not-the-password" }),
        None,
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/councils", None).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_401(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/councils", Some("not.a.jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_cannot_create_council(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "student1", "student").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/councils",
        json!({ "code": "HD01", "name": "Council" }),
        Some(&token),
    )
    .await;
    let json = assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    assert!(json["error"].as_str().unwrap().contains("'student'"));

    // Reads are open to every authenticated user.
    let response = get(app, "/api/v1/councils", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_user_validates_input(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "admin1", "admin").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "lect1", "email": "not-an-email", "password": "long-enough", "role": "lecturer" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "lect1", "email": "l1@uni.edu", "password": "short", "role": "lecturer" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "lect1", "email": "l1@uni.edu", "password": "long-enough", "role": "dean" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "lect1", "email": "l1@uni.edu", "password": "long-enough", "role": "lecturer" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["role"], "lecturer");

    let response = post_json(
        app,
        "/api/v1/users",
        json!({ "username": "lect1", "email": "other@uni.edu", "password": "long-enough", "role": "lecturer" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_current_user_profile_edit(pool: PgPool) {
    let (user_id, token) = create_user_with_token(&pool, "lect1", "lecturer").await;
    let app = build_test_app(pool);

    let response = patch_json(
        app.clone(),
        "/api/v1/users/current-user",
        json!({ "first_name": "Lan" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/users/current-user", Some(&token)).await).await;
    assert_eq!(json["id"], user_id);
    assert_eq!(json["first_name"], "Lan");
    assert_eq!(json["email"], "lect1@uni.edu");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_requires_current(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "lect1", "lecturer").await;
    let app = build_test_app(pool);

    let response = put_json(
        app.clone(),
        "/api/v1/users/change-password",
        json!({ "current_password": "wrong", "new_password": "brand-new-pass" }),
        Some(&token),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    let response = put_json(
        app.clone(),
        "/api/v1/users/change-password",
        json!({ "current_password": TEST_PASSWORD, "new_password": "brand-new-pass" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "lect1", "password": "brand-new-pass" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
