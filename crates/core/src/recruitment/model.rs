//! Records, DTOs and read views of the recruitment domain.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationPayload, ApplicationStatus};
use crate::capacity::{remaining_slots, ApplicationCounts};
use crate::error::CoreError;
use crate::project_status::{derive_status, EffectiveStatus, ProjectStatus, StatusBadge};
use crate::roles::is_admin;
use crate::types::{DbId, Timestamp};

/// Maximum length (characters) of a project title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Largest team a project may recruit.
pub const MAX_TEAM_SIZE: i32 = 100;

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        is_admin(&self.role)
    }

    /// Owners and administrators manage a project and review its applications.
    pub fn can_manage(&self, project: &Project) -> bool {
        self.user_id == project.author_id || self.is_admin()
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A project recruiting a team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub team_size: i32,
    pub current_members: i32,
    pub deadline: Option<Timestamp>,
    pub project_status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}


/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub team_size: i32,
    pub deadline: Option<Timestamp>,
}

impl CreateProject {
    /// Validate the DTO. A deadline, when given, must lie in the future.
    pub fn validate(&self, now: Timestamp) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation(format!(
                "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
            )));
        }
        if !(1..=MAX_TEAM_SIZE).contains(&self.team_size) {
            return Err(CoreError::Validation(format!(
                "team_size must be between 1 and {MAX_TEAM_SIZE}, got {}",
                self.team_size
            )));
        }
        if let Some(deadline) = self.deadline {
            if deadline <= now {
                return Err(CoreError::Validation(
                    "deadline must be in the future".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Request body for changing a project's stored status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// A candidate's application to join a project team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: DbId,
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub status: ApplicationStatus,
    #[serde(flatten)]
    pub payload: ApplicationPayload,
    pub applied_at: Timestamp,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub withdrawn_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new pending application.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub payload: ApplicationPayload,
}

/// Reviewer metadata written together with an accept or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStamp {
    pub reviewer_id: DbId,
    pub reviewed_at: Timestamp,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Collaborator data
// ---------------------------------------------------------------------------

/// Public profile of a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Read views
// ---------------------------------------------------------------------------

/// Capacity and status of a project as computed at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedProjectView {
    pub effective_status: EffectiveStatus,
    pub badge: StatusBadge,
    pub accepted_count: i64,
    pub pending_count: i64,
    pub remaining_slots: i64,
}

impl DerivedProjectView {
    /// Derive the view from a freshly counted ledger.
    pub fn compute(
        project: &Project,
        counts: &ApplicationCounts,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        let remaining = remaining_slots(project.id, project.team_size, counts.accepted)?;
        let effective_status = derive_status(
            project.project_status,
            project.team_size,
            counts.accepted,
            project.deadline,
            now,
        );
        Ok(Self {
            effective_status,
            badge: effective_status.badge(),
            accepted_count: counts.accepted,
            pending_count: counts.pending,
            remaining_slots: remaining,
        })
    }
}

/// Public visitor view of a single project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub owner: Option<UserProfile>,
    pub derived: DerivedProjectView,
}

/// Project fields shown next to an applicant's own application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
    pub team_size: i32,
    pub current_members: i32,
    pub deadline: Option<Timestamp>,
    pub owner_id: DbId,
    pub owner_display_name: Option<String>,
    /// Accepted applications, recounted from the rows.
    pub accepted_count: i64,
    pub effective_status: EffectiveStatus,
}

impl ProjectSummary {
    /// Build the summary from a recounted `accepted_count`, so it agrees
    /// with [`DerivedProjectView`] even if the stored counter drifted.
    pub fn new(
        project: &Project,
        owner: Option<&UserProfile>,
        accepted_count: i64,
        now: Timestamp,
    ) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            thumbnail_url: project.thumbnail_url.clone(),
            category: project.category.clone(),
            team_size: project.team_size,
            current_members: project.current_members,
            deadline: project.deadline,
            owner_id: project.author_id,
            owner_display_name: owner.map(|o| o.display_name.clone()),
            accepted_count,
            effective_status: derive_status(
                project.project_status,
                project.team_size,
                accepted_count,
                project.deadline,
                now,
            ),
        }
    }
}

/// Applicant-facing row: my application and the project it targets.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantApplicationView {
    pub application: Application,
    pub project: ProjectSummary,
}

/// Owner-facing nested row: an application and who sent it.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerApplicationView {
    pub application: Application,
    pub applicant: Option<UserProfile>,
}

/// Owner-facing row: one of my projects and every application to it.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerProjectView {
    pub project: Project,
    pub derived: DerivedProjectView,
    pub applications: Vec<OwnerApplicationView>,
}
