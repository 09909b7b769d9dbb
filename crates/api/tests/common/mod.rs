#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crewhub_api::auth::jwt::{generate_access_token, JwtConfig};
use crewhub_api::config::ServerConfig;
use crewhub_api::router::build_app_router;
use crewhub_api::state::AppState;
use crewhub_core::recruitment::{InMemoryRecruitmentStore, UserProfile};
use crewhub_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use crewhub_core::types::DbId;

pub const OWNER: DbId = 1;
pub const ADMIN: DbId = 2;
pub const ALICE: DbId = 10;
pub const BOB: DbId = 11;
pub const CAROL: DbId = 12;

const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store seeded
/// with a few users.
///
/// The returned router shares its store across clones, so tests clone it
/// for every request.
pub async fn build_test_app() -> Router {
    let store = InMemoryRecruitmentStore::new();
    for (id, name) in [
        (OWNER, "Olivia Owner"),
        (ADMIN, "Ada Admin"),
        (ALICE, "Alice"),
        (BOB, "Bob"),
        (CAROL, "Carol"),
    ] {
        store
            .add_user(UserProfile {
                id,
                display_name: name.to_string(),
                avatar_url: None,
            })
            .await;
    }

    let config = test_config();
    build_app_router(AppState::new(store, config.clone()), &config)
}

/// Mint a valid access token for `user_id`.
pub fn token_for(user_id: DbId) -> String {
    let role = if user_id == ADMIN { ROLE_ADMIN } else { ROLE_MEMBER };
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project owned by [`OWNER`] with a deadline next week; returns its id.
pub async fn create_project(app: &Router, team_size: i32) -> DbId {
    let deadline = Utc::now() + Duration::days(7);
    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        json!({
            "title": "Community garden planner",
            "description": "A small app to share plots",
            "team_size": team_size,
            "deadline": deadline,
        }),
        &token_for(OWNER),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Submit an application as `applicant`; returns its id.
pub async fn apply(app: &Router, project_id: DbId, applicant: DbId) -> DbId {
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/applications"),
        application_body(),
        &token_for(applicant),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub fn application_body() -> Value {
    json!({
        "motivation": "I would love to help with the backend",
        "github_url": "https://github.com/example",
        "available_time": "10h / week",
    })
}

/// Review `application_id` as `reviewer` with the given body.
pub async fn review(app: &Router, application_id: DbId, reviewer: DbId, body: Value) -> Response<Body> {
    post_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{application_id}/review"),
        body,
        &token_for(reviewer),
    )
    .await
}
