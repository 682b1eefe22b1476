//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use qna_api::auth::tokens::TokenSigner;
use qna_api::config::ServerConfig;
use qna_api::router::build_app_router;
use qna_api::state::AppState;
use qna_db::models::user::{CreateUser, User};
use qna_db::repositories::UserRepo;
use qna_events::{JobQueue, PgJobQueue};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_base_url: "https://qna.test".to_string(),
        jwt_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_ttl_mins: 15,
        refresh_token_ttl_days: 7,
    }
}

/// Full application router backed by the Postgres job queue.
pub fn build_test_app(pool: PgPool) -> Router {
    let queue = Arc::new(PgJobQueue::new(pool.clone()));
    build_test_app_with_queue(pool, queue)
}

/// Full application router with a caller-supplied job queue.
pub fn build_test_app_with_queue(pool: PgPool, job_queue: Arc<dyn JobQueue>) -> Router {
    build_app_router(AppState::new(pool, test_config(), job_queue))
}

/// Insert a user directly and return it.
pub async fn create_user(pool: &PgPool, name: &str, role: Option<&str>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "unused".to_string(),
            role: role.map(str::to_string),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Signed access token for `user`.
pub fn token_for(user: &User) -> String {
    TokenSigner::from_config(&test_config())
        .issue_access(user.id, &user.role, Utc::now())
        .expect("token signing should succeed")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a question through the API and return its id.
pub async fn create_question(app: Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/questions",
        token,
        serde_json::json!({ "title": title, "body": "Question body long enough" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an answer through the API and return its id.
pub async fn create_answer(app: Router, token: &str, question_id: i64, body: &str) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/v1/questions/{question_id}/answers"),
        token,
        serde_json::json!({ "body": body }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
