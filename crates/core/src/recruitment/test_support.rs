//! Fixtures shared by the recruitment service tests.

use chrono::{Duration, TimeZone, Utc};

use crate::application::{ApplicationPayload, ApplicationStatus, ReviewApplication};
use crate::clock::FixedClock;
use crate::roles::{ROLE_ADMIN, ROLE_MEMBER};
use crate::types::{DbId, Timestamp};

use super::memory::InMemoryRecruitmentStore;
use super::model::{Actor, Application, CreateProject, Project, UserProfile};
use super::service::RecruitmentService;
use super::store::RecruitmentStore;

pub(crate) type TestService = RecruitmentService<InMemoryRecruitmentStore, FixedClock>;

pub(crate) const OWNER: DbId = 1;
pub(crate) const ADMIN: DbId = 2;
pub(crate) const ALICE: DbId = 10;
pub(crate) const BOB: DbId = 11;
pub(crate) const CAROL: DbId = 12;

pub(crate) fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

pub(crate) fn owner() -> Actor {
    Actor::new(OWNER, ROLE_MEMBER)
}

pub(crate) fn admin() -> Actor {
    Actor::new(ADMIN, ROLE_ADMIN)
}

pub(crate) fn member(user_id: DbId) -> Actor {
    Actor::new(user_id, ROLE_MEMBER)
}

pub(crate) fn payload() -> ApplicationPayload {
    ApplicationPayload {
        motivation: "I would love to help with the backend".to_string(),
        github_url: Some("https://github.com/example".to_string()),
        ..Default::default()
    }
}

pub(crate) fn rejection() -> ReviewApplication {
    ReviewApplication::reject(Some("We picked someone with more frontend time".into()), None)
}

/// Service over an empty in-memory store with a few known users.
pub(crate) async fn service() -> TestService {
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
    RecruitmentService::with_clock(store, FixedClock::new(now()))
}

pub(crate) fn new_project(team_size: i32, deadline: Option<Timestamp>) -> CreateProject {
    CreateProject {
        title: "Community garden planner".to_string(),
        description: Some("A small app to share plots".to_string()),
        category: Some("web".to_string()),
        thumbnail_url: None,
        team_size,
        deadline,
    }
}

/// A recruiting project owned by [`OWNER`] with a deadline next week.
pub(crate) async fn project(svc: &TestService, team_size: i32) -> Project {
    svc.create_project(&owner(), new_project(team_size, Some(now() + Duration::days(7))))
        .await
        .unwrap()
}

pub(crate) async fn apply(svc: &TestService, project_id: DbId, applicant_id: DbId) -> Application {
    svc.submit_application(project_id, applicant_id, payload())
        .await
        .unwrap()
}

pub(crate) async fn accepted(svc: &TestService, project_id: DbId, applicant_id: DbId) -> Application {
    let app = apply(svc, project_id, applicant_id).await;
    svc.review_application(app.id, &owner(), ReviewApplication::accept(None))
        .await
        .unwrap()
}

/// Assert the stored member counter matches the accepted rows and never
/// exceeds the team size.
pub(crate) async fn assert_ledger_consistent(svc: &TestService, project_id: DbId) {
    let project = svc.store().find_project(project_id).await.unwrap().unwrap();
    let accepted = svc.store().accepted_rows(project_id).await;
    assert_eq!(
        i64::from(project.current_members),
        accepted,
        "current_members drifted from accepted rows"
    );
    assert!(project.current_members <= project.team_size);
    assert!(project.current_members >= 0);
}

pub(crate) async fn status_of(svc: &TestService, application_id: DbId) -> ApplicationStatus {
    svc.store()
        .find_application(application_id)
        .await
        .unwrap()
        .unwrap()
        .status
}
