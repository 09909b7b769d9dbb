//! HTTP-level tests for the application lifecycle: submit, review, withdraw.

mod common;

use axum::http::StatusCode;
use common::{
    apply, body_json, create_project, get_auth, post_auth, post_json_auth, review, token_for,
    ADMIN, ALICE, BOB, CAROL, OWNER,
};
use serde_json::json;

#[tokio::test]
async fn submit_returns_201_pending() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/applications"),
        json!({"motivation": "  I ship small PRs often  ", "portfolio_url": "   "}),
        &token_for(ALICE),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "pending");
    assert_eq!(data["applicant_id"], ALICE);
    assert_eq!(data["motivation"], "I ship small PRs often");
    assert!(data["portfolio_url"].is_null());
    assert!(data["reviewed_by"].is_null());
}

#[tokio::test]
async fn duplicate_submission_is_409() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    apply(&app, project, ALICE).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/applications"),
        common::application_body(),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_APPLICATION");
}

#[tokio::test]
async fn blank_motivation_is_400() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project}/applications"),
        json!({"motivation": "   "}),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn accept_stamps_reviewer_and_fills_slot() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 1).await;
    let application = apply(&app, project, ALICE).await;

    let response = review(
        &app,
        application,
        OWNER,
        json!({"decision": "accept", "review_notes": "Welcome aboard"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "accepted");
    assert_eq!(json["data"]["reviewed_by"], OWNER);
    assert_eq!(json["data"]["review_notes"], "Welcome aboard");
    assert!(json["data"]["reviewed_at"].is_string());
}

#[tokio::test]
async fn accepting_into_full_team_is_position_filled() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 1).await;
    let first = apply(&app, project, ALICE).await;
    let second = apply(&app, project, BOB).await;

    review(&app, first, OWNER, json!({"decision": "accept"})).await;
    let response = review(&app, second, OWNER, json!({"decision": "accept"})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "POSITION_FILLED");

    let response = get_auth(
        app,
        &format!("/api/v1/applications/{second}"),
        &token_for(BOB),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[tokio::test]
async fn concurrent_accepts_for_last_slot_admit_one() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 1).await;
    let first = apply(&app, project, ALICE).await;
    let second = apply(&app, project, BOB).await;

    let (a, b) = tokio::join!(
        review(&app, first, OWNER, json!({"decision": "accept"})),
        review(&app, second, ADMIN, json!({"decision": "accept"})),
    );

    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let json = body_json(common::get(app, &format!("/api/v1/projects/{project}")).await).await;
    assert_eq!(json["data"]["project"]["current_members"], 1);
    assert_eq!(json["data"]["derived"]["accepted_count"], 1);
}

#[tokio::test]
async fn reject_requires_reason_or_notes() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;

    let response = review(&app, application, OWNER, json!({"decision": "reject"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = review(
        &app,
        application,
        OWNER,
        json!({"decision": "reject", "rejection_reason": "Team is set"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_reason"], "Team is set");
}

#[tokio::test]
async fn non_owner_cannot_review() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;

    let response = review(&app, application, BOB, json!({"decision": "accept"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "NOT_AUTHOR");
}

#[tokio::test]
async fn reviewing_twice_is_invalid_transition() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;
    review(&app, application, OWNER, json!({"decision": "accept"})).await;

    let response = review(
        &app,
        application,
        OWNER,
        json!({"decision": "reject", "rejection_reason": "Changed my mind"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn withdraw_then_resubmit() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;

    let response = post_auth(
        app.clone(),
        &format!("/api/v1/applications/{application}/withdraw"),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "withdrawn");
    assert!(json["data"]["withdrawn_at"].is_string());

    let response = post_auth(
        app.clone(),
        &format!("/api/v1/applications/{application}/withdraw"),
        &token_for(ALICE),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let again = apply(&app, project, ALICE).await;
    assert_ne!(again, application);
}

#[tokio::test]
async fn withdrawing_accepted_frees_the_slot() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 1).await;
    let application = apply(&app, project, ALICE).await;
    review(&app, application, OWNER, json!({"decision": "accept"})).await;

    post_auth(
        app.clone(),
        &format!("/api/v1/applications/{application}/withdraw"),
        &token_for(ALICE),
    )
    .await;

    let json = body_json(common::get(app.clone(), &format!("/api/v1/projects/{project}")).await).await;
    assert_eq!(json["data"]["project"]["current_members"], 0);
    assert_eq!(json["data"]["derived"]["effective_status"], "recruiting");

    let next = apply(&app, project, BOB).await;
    let response = review(&app, next, OWNER, json!({"decision": "accept"})).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn only_applicant_withdraws() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;

    let response = post_auth(
        app,
        &format!("/api/v1/applications/{application}/withdraw"),
        &token_for(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn application_visible_to_applicant_owner_and_admin_only() {
    let app = common::build_test_app().await;
    let project = create_project(&app, 2).await;
    let application = apply(&app, project, ALICE).await;
    let uri = format!("/api/v1/applications/{application}");

    for viewer in [ALICE, OWNER, ADMIN] {
        let response = get_auth(app.clone(), &uri, &token_for(viewer)).await;
        assert_eq!(response.status(), StatusCode::OK, "viewer {viewer}");
    }

    let response = get_auth(app, &uri, &token_for(CAROL)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
