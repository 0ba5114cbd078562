#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use thesis_api::auth::jwt::{generate_access_token, JwtConfig};
use thesis_api::auth::password::hash_password;
use thesis_api::config::ServerConfig;
use thesis_api::report::LocalReportStore;
use thesis_api::router::build_app_router;
use thesis_api::state::AppState;
use thesis_core::aggregation::TotalScoreMethod;
use thesis_core::roles::UserRole;
use thesis_core::types::DbId;
use thesis_db::models::user::CreateUser;
use thesis_db::repositories::UserRepo;
use thesis_events::EventBus;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "defense-2024!";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-for-integration-tests".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Test `ServerConfig` writing reports into `reports_dir`.
pub fn test_config(reports_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        reports_dir,
        total_score_method: TotalScoreMethod::default(),
        jwt: test_jwt_config(),
    }
}

/// Build the full application with its middleware stack.
///
/// Reports go to a fresh temporary directory that outlives the test.
pub fn build_test_app(pool: PgPool) -> Router {
    let reports_dir = tempfile::tempdir()
        .expect("tempdir should be created")
        .into_path();
    build_test_app_with_reports(pool, reports_dir)
}

pub fn build_test_app_with_reports(pool: PgPool, reports_dir: PathBuf) -> Router {
    let config = test_config(reports_dir.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        report_store: Arc::new(LocalReportStore::new(reports_dir)),
    };
    build_app_router(state, &config)
}

/// Insert a user with [`TEST_PASSWORD`] and return its id and an access token.
pub async fn create_user_with_token(pool: &PgPool, username: &str, role: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            first_name: "Test".to_string(),
            last_name: username.to_string(),
            avatar_url: None,
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let role = UserRole::from_str_value(role).expect("fixture role should be valid");
    let token = generate_access_token(user.id, role, &test_jwt_config())
        .expect("token generation should succeed");
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, builder("GET", uri, token).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, builder("DELETE", uri, token).body(Body::empty()).unwrap()).await
}

async fn with_json(
    method: &str,
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let request = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    with_json("POST", app, uri, body, token).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    with_json("PUT", app, uri, body, token).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    with_json("PATCH", app, uri, body, token).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert the status and the machine code of an error response.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
    json
}
