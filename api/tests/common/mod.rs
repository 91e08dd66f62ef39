#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_api::{
    auth::{Claims, TokenIssuer},
    db, rest, AppState,
};
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Private in-memory database. One connection, never recycled, so every
/// query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub async fn test_state() -> AppState {
    AppState::new(test_pool().await, TokenIssuer::hs256(SECRET)).unwrap()
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (rest::router(state.clone()), state)
}

/// Like [`test_app`], also handing back the pool for direct row checks.
pub async fn test_app_with_db() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let state = AppState::new(pool.clone(), TokenIssuer::hs256(SECRET)).unwrap();
    (rest::router(state), pool)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

pub fn registration(username: &str, email: &str, password: &str) -> Value {
    serde_json::json!({
        "username": username,
        "firstName": "Test",
        "lastName": "User",
        "email": email,
        "password": password,
    })
}

pub fn register_request(username: &str, email: &str, password: &str) -> Request<Body> {
    json_request(
        "POST",
        "/auth/register",
        None,
        &registration(username, email, password),
    )
}

/// Token for a user that never registered; catalog routes only check the
/// signature, not the users table.
pub fn token_for(username: &str) -> String {
    TokenIssuer::hs256(SECRET).issue(username).unwrap()
}

/// Correctly signed with the test key, but with an arbitrary expiry.
pub fn token_expiring_at(username: &str, exp: i64) -> String {
    let claims = Claims {
        sub: username.to_string(),
        exp: exp as usize,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}
