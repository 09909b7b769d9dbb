//! HTTP-level tests for project creation, overview and status changes.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    apply, body_json, create_project, get, post_json_auth, put_json_auth, review, token_for,
    ADMIN, ALICE, BOB, OWNER,
};
use serde_json::json;

#[tokio::test]
async fn create_project_returns_201_recruiting() {
    let app = common::build_test_app().await;
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({"title": "Recipe swap", "team_size": 3, "category": "mobile"}),
        &token_for(OWNER),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Recipe swap");
    assert_eq!(json["data"]["author_id"], OWNER);
    assert_eq!(json["data"]["project_status"], "recruiting");
    assert_eq!(json["data"]["current_members"], 0);
}

#[tokio::test]
async fn create_project_rejects_bad_team_size_and_past_deadline() {
    let app = common::build_test_app().await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        json!({"title": "Too small", "team_size": 0}),
        &token_for(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({
            "title": "Too late",
            "team_size": 2,
            "deadline": Utc::now() - Duration::days(1),
        }),
        &token_for(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overview_reports_derived_counts_and_owner() {
    let app = common::build_test_app().await;
    let id = create_project(&app, 2).await;
    let a = apply(&app, id, ALICE).await;
    apply(&app, id, BOB).await;
    let response = review(&app, a, OWNER, json!({"decision": "accept"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["project"]["current_members"], 1);
    assert_eq!(data["owner"]["display_name"], "Olivia Owner");
    assert_eq!(data["derived"]["effective_status"], "recruiting");
    assert_eq!(data["derived"]["accepted_count"], 1);
    assert_eq!(data["derived"]["pending_count"], 1);
    assert_eq!(data["derived"]["remaining_slots"], 1);
}

#[tokio::test]
async fn full_team_shows_full() {
    let app = common::build_test_app().await;
    let id = create_project(&app, 1).await;
    let a = apply(&app, id, ALICE).await;
    review(&app, a, OWNER, json!({"decision": "accept"})).await;

    let json = body_json(get(app, &format!("/api/v1/projects/{id}")).await).await;
    assert_eq!(json["data"]["derived"]["effective_status"], "full");
    assert_eq!(json["data"]["derived"]["remaining_slots"], 0);
}

#[tokio::test]
async fn unknown_project_is_404() {
    let app = common::build_test_app().await;
    let response = get(app, "/api/v1/projects/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn only_owner_or_admin_changes_status() {
    let app = common::build_test_app().await;
    let id = create_project(&app, 3).await;
    let uri = format!("/api/v1/projects/{id}/status");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({"status": "in_progress"}),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "NOT_AUTHOR");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({"status": "in_progress"}),
        &token_for(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["project_status"], "in_progress");

    let response = put_json_auth(
        app,
        &uri,
        json!({"status": "completed"}),
        &token_for(ADMIN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["project_status"], "completed");
}

#[tokio::test]
async fn closed_project_refuses_applications() {
    let app = common::build_test_app().await;
    let id = create_project(&app, 3).await;
    put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/status"),
        json!({"status": "cancelled"}),
        &token_for(OWNER),
    )
    .await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{id}/applications"),
        common::application_body(),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "PROJECT_CLOSED");
}
