//! Service struct, capacity ledger queries and project administration.

use crate::capacity::{self, verify_member_counter, ApplicationCounts};
use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::project_status::{validate_status_change, ProjectStatus};
use crate::types::{DbId, Timestamp};

use super::model::{
    Actor, Application, CreateProject, DerivedProjectView, Project, ProjectOverview,
    UserProfile,
};
use super::store::RecruitmentStore;

/// Orchestrates the recruitment workflow over a store and a clock.
pub struct RecruitmentService<S, C = SystemClock> {
    pub(super) store: S,
    clock: C,
}

impl<S: RecruitmentStore> RecruitmentService<S> {
    /// Service reading wall-clock time.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: RecruitmentStore, C: Clock> RecruitmentService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub(crate) async fn load_project(&self, id: DbId) -> Result<Project, S::Error> {
        self.store
            .find_project(id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Project", id }.into())
    }

    pub(crate) async fn load_application(&self, id: DbId) -> Result<Application, S::Error> {
        self.store.find_application(id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Application",
                id,
            }
            .into()
        })
    }

    pub(crate) async fn owner_profile(&self, user_id: DbId) -> Result<Option<UserProfile>, S::Error> {
        Ok(self.store.find_user_profiles(&[user_id]).await?.into_iter().next())
    }

    // -- capacity ledger ----------------------------------------------------

    /// Number of accepted members, recounted from the application rows.
    pub async fn accepted_count(&self, project_id: DbId) -> Result<i64, S::Error> {
        self.load_project(project_id).await?;
        Ok(self.store.count_applications(project_id).await?.accepted)
    }

    /// Open slots on the project's team. Never negative.
    pub async fn remaining_slots(&self, project_id: DbId) -> Result<i64, S::Error> {
        let project = self.load_project(project_id).await?;
        self.recount_remaining(&project).await
    }

    /// Recount accepted members and return the open slots.
    ///
    /// A stored counter that disagrees with the recount is logged; the
    /// recount wins. A negative remainder is fatal.
    pub(crate) async fn recount_remaining(&self, project: &Project) -> Result<i64, S::Error> {
        let counts = self.recount(project).await?;
        capacity::remaining_slots(project.id, project.team_size, counts.accepted)
            .map_err(|err| integrity_failure(err).into())
    }

    /// Count the project's applications by status, logging any drift of the
    /// stored member counter.
    pub(crate) async fn recount(&self, project: &Project) -> Result<ApplicationCounts, S::Error> {
        let counts = self.store.count_applications(project.id).await?;
        if let Err(err) = verify_member_counter(project.id, project.current_members, counts.accepted)
        {
            tracing::error!(project_id = project.id, error = %err, "Member counter drift detected");
        }
        Ok(counts)
    }

    // -- projects -----------------------------------------------------------

    /// Create a recruiting project owned by `actor`.
    pub async fn create_project(
        &self,
        actor: &Actor,
        input: CreateProject,
    ) -> Result<Project, S::Error> {
        let now = self.now();
        input.validate(now)?;

        let project = self.store.create_project(actor.user_id, &input, now).await?;
        tracing::info!(
            project_id = project.id,
            author_id = actor.user_id,
            team_size = project.team_size,
            "Project created"
        );
        Ok(project)
    }

    /// Change a project's stored status. Owner or admin only.
    pub async fn update_project_status(
        &self,
        project_id: DbId,
        actor: &Actor,
        status: ProjectStatus,
    ) -> Result<Project, S::Error> {
        let project = self.load_project(project_id).await?;
        if !actor.can_manage(&project) {
            return Err(CoreError::NotAuthor {
                actor_id: actor.user_id,
                action: "change this project's status",
            }
            .into());
        }

        let remaining = self.recount_remaining(&project).await?;
        validate_status_change(project.project_status, status, remaining == 0)?;
        if project.project_status == status {
            return Ok(project);
        }

        let updated = self
            .store
            .set_project_status(project_id, project.project_status, status, self.now())
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "Project {project_id} status changed concurrently; reload and retry"
                ))
            })?;

        tracing::info!(
            project_id,
            user_id = actor.user_id,
            from = %project.project_status,
            to = %status,
            "Project status changed"
        );
        Ok(updated)
    }

    /// Public view of a project with its derived status and counts.
    pub async fn get_project_overview(&self, project_id: DbId) -> Result<ProjectOverview, S::Error> {
        let project = self.load_project(project_id).await?;
        let counts = self.recount(&project).await?;
        let derived =
            DerivedProjectView::compute(&project, &counts, self.now()).map_err(integrity_failure)?;
        let owner = self.owner_profile(project.author_id).await?;
        Ok(ProjectOverview {
            project,
            owner,
            derived,
        })
    }
}

/// Log data-integrity violations before they propagate.
pub(crate) fn integrity_failure(err: CoreError) -> CoreError {
    if let CoreError::DataIntegrity(ref detail) = err {
        tracing::error!(detail = %detail, "Data integrity violation");
    }
    err
}
