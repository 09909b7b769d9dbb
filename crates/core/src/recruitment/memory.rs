//! In-process [`RecruitmentStore`] backed by ordered maps.
//!
//! One `tokio::sync::Mutex` guards the whole state, so every conditional
//! write checks and mutates under a single lock acquisition. Used by tests
//! and local tooling.

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::Mutex;

use crate::application::ApplicationStatus;
use crate::capacity::ApplicationCounts;
use crate::error::CoreError;
use crate::project_status::ProjectStatus;
use crate::types::{DbId, Timestamp};

use super::model::{
    Application, CreateApplication, CreateProject, Project, ReviewStamp, UserProfile,
};
use super::store::{RecruitmentStore, WriteOutcome};

#[derive(Debug, Default)]
struct State {
    projects: BTreeMap<DbId, Project>,
    applications: BTreeMap<DbId, Application>,
    users: BTreeMap<DbId, UserProfile>,
    last_project_id: DbId,
    last_application_id: DbId,
}

/// Memory-resident recruitment store.
#[derive(Debug, Default)]
pub struct InMemoryRecruitmentStore {
    state: Mutex<State>,
}

impl InMemoryRecruitmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user profile for the profile lookups.
    pub async fn add_user(&self, profile: UserProfile) {
        self.state.lock().await.users.insert(profile.id, profile);
    }

    /// Number of accepted applications for `project_id`, counted from rows.
    pub async fn accepted_rows(&self, project_id: DbId) -> i64 {
        let state = self.state.lock().await;
        state
            .applications
            .values()
            .filter(|a| a.project_id == project_id && a.status == ApplicationStatus::Accepted)
            .count() as i64
    }

    /// Overwrite a project's member counter, bypassing every guard. Lets
    /// tests plant corrupt data.
    pub async fn force_member_counter(&self, project_id: DbId, current_members: i32) {
        if let Some(project) = self.state.lock().await.projects.get_mut(&project_id) {
            project.current_members = current_members;
        }
    }
}

impl RecruitmentStore for InMemoryRecruitmentStore {
    type Error = CoreError;

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn create_project(
        &self,
        author_id: DbId,
        input: &CreateProject,
        now: Timestamp,
    ) -> Result<Project, CoreError> {
        let mut state = self.state.lock().await;
        state.last_project_id += 1;
        let project = Project {
            id: state.last_project_id,
            author_id,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            category: input.category.clone(),
            thumbnail_url: input.thumbnail_url.clone(),
            team_size: input.team_size,
            current_members: 0,
            deadline: input.deadline,
            project_status: ProjectStatus::Recruiting,
            created_at: now,
            updated_at: now,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        Ok(self.state.lock().await.projects.get(&id).cloned())
    }

    async fn find_projects(&self, ids: &[DbId]) -> Result<Vec<Project>, CoreError> {
        let state = self.state.lock().await;
        let wanted: BTreeSet<DbId> = ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| state.projects.get(id).cloned())
            .collect())
    }

    async fn set_project_status(
        &self,
        id: DbId,
        expected: ProjectStatus,
        status: ProjectStatus,
        now: Timestamp,
    ) -> Result<Option<Project>, CoreError> {
        let mut state = self.state.lock().await;
        match state.projects.get_mut(&id) {
            Some(project) if project.project_status == expected => {
                project.project_status = status;
                project.updated_at = now;
                Ok(Some(project.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_projects_by_author(
        &self,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Project>, i64), CoreError> {
        let state = self.state.lock().await;
        let mut owned: Vec<&Project> = state
            .projects
            .values()
            .filter(|p| p.author_id == author_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = owned.len() as i64;
        let page = paginate(owned, limit, offset);
        Ok((page, total))
    }

    async fn find_application(&self, id: DbId) -> Result<Option<Application>, CoreError> {
        Ok(self.state.lock().await.applications.get(&id).cloned())
    }

    async fn find_open_application(
        &self,
        project_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<Application>, CoreError> {
        let state = self.state.lock().await;
        Ok(state
            .applications
            .values()
            .find(|a| {
                a.project_id == project_id && a.applicant_id == applicant_id && a.status.is_open()
            })
            .cloned())
    }

    async fn count_applications(&self, project_id: DbId) -> Result<ApplicationCounts, CoreError> {
        let state = self.state.lock().await;
        Ok(ApplicationCounts::tally(
            state
                .applications
                .values()
                .filter(|a| a.project_id == project_id)
                .map(|a| a.status),
        ))
    }

    async fn insert_application(
        &self,
        input: &CreateApplication,
        now: Timestamp,
    ) -> Result<Application, CoreError> {
        let mut state = self.state.lock().await;
        if !state.projects.contains_key(&input.project_id) {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: input.project_id,
            });
        }
        let duplicate = state.applications.values().any(|a| {
            a.project_id == input.project_id
                && a.applicant_id == input.applicant_id
                && a.status.is_open()
        });
        if duplicate {
            return Err(CoreError::DuplicateApplication {
                project_id: input.project_id,
                applicant_id: input.applicant_id,
            });
        }

        state.last_application_id += 1;
        let application = Application {
            id: state.last_application_id,
            project_id: input.project_id,
            applicant_id: input.applicant_id,
            status: ApplicationStatus::Pending,
            payload: input.payload.clone(),
            applied_at: now,
            reviewed_by: None,
            reviewed_at: None,
            review_notes: None,
            rejection_reason: None,
            withdrawn_at: None,
            updated_at: now,
        };
        state.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn commit_acceptance(
        &self,
        application_id: DbId,
        project_id: DbId,
        stamp: &ReviewStamp,
    ) -> Result<WriteOutcome, CoreError> {
        let mut state = self.state.lock().await;
        let State {
            projects,
            applications,
            ..
        } = &mut *state;

        let Some(project) = projects.get_mut(&project_id) else {
            return Ok(WriteOutcome::Missing);
        };
        let Some(application) = applications
            .get_mut(&application_id)
            .filter(|a| a.project_id == project_id)
        else {
            return Ok(WriteOutcome::Missing);
        };
        if project.current_members >= project.team_size {
            return Ok(WriteOutcome::CapacityExhausted);
        }
        if application.status != ApplicationStatus::Pending {
            return Ok(WriteOutcome::StatusChanged(application.status));
        }

        project.current_members += 1;
        project.updated_at = stamp.reviewed_at;
        application.status = ApplicationStatus::Accepted;
        stamp_review(application, stamp);
        Ok(WriteOutcome::Committed(application.clone()))
    }

    async fn commit_rejection(
        &self,
        application_id: DbId,
        stamp: &ReviewStamp,
    ) -> Result<WriteOutcome, CoreError> {
        let mut state = self.state.lock().await;
        let Some(application) = state.applications.get_mut(&application_id) else {
            return Ok(WriteOutcome::Missing);
        };
        if application.status != ApplicationStatus::Pending {
            return Ok(WriteOutcome::StatusChanged(application.status));
        }
        application.status = ApplicationStatus::Rejected;
        stamp_review(application, stamp);
        Ok(WriteOutcome::Committed(application.clone()))
    }

    async fn commit_withdrawal(
        &self,
        application_id: DbId,
        project_id: DbId,
        from: ApplicationStatus,
        now: Timestamp,
    ) -> Result<WriteOutcome, CoreError> {
        let mut state = self.state.lock().await;
        let State {
            projects,
            applications,
            ..
        } = &mut *state;

        let Some(application) = applications
            .get_mut(&application_id)
            .filter(|a| a.project_id == project_id)
        else {
            return Ok(WriteOutcome::Missing);
        };
        if application.status != from {
            return Ok(WriteOutcome::StatusChanged(application.status));
        }

        if from == ApplicationStatus::Accepted {
            let Some(project) = projects.get_mut(&project_id) else {
                return Ok(WriteOutcome::Missing);
            };
            if project.current_members <= 0 {
                return Err(CoreError::DataIntegrity(format!(
                    "Project {project_id} has an accepted application {application_id} \
                     but current_members is {}",
                    project.current_members
                )));
            }
            project.current_members -= 1;
            project.updated_at = now;
        }

        application.status = ApplicationStatus::Withdrawn;
        application.withdrawn_at = Some(now);
        application.updated_at = now;
        Ok(WriteOutcome::Committed(application.clone()))
    }

    async fn list_applications_by_applicant(
        &self,
        applicant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Application>, i64), CoreError> {
        let state = self.state.lock().await;
        let mut mine: Vec<&Application> = state
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant_id)
            .collect();
        sort_recent_first(&mut mine);
        let total = mine.len() as i64;
        Ok((paginate(mine, limit, offset), total))
    }

    async fn list_applications_for_projects(
        &self,
        project_ids: &[DbId],
    ) -> Result<Vec<Application>, CoreError> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Application> = state
            .applications
            .values()
            .filter(|a| project_ids.contains(&a.project_id))
            .collect();
        sort_recent_first(&mut matching);
        Ok(matching.into_iter().cloned().collect())
    }

    async fn find_user_profiles(&self, user_ids: &[DbId]) -> Result<Vec<UserProfile>, CoreError> {
        let state = self.state.lock().await;
        let wanted: BTreeSet<DbId> = user_ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

fn stamp_review(application: &mut Application, stamp: &ReviewStamp) {
    application.reviewed_by = Some(stamp.reviewer_id);
    application.reviewed_at = Some(stamp.reviewed_at);
    application.review_notes = stamp.review_notes.clone();
    application.rejection_reason = stamp.rejection_reason.clone();
    application.updated_at = stamp.reviewed_at;
}

fn sort_recent_first(applications: &mut [&Application]) {
    applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(b.id.cmp(&a.id)));
}

fn paginate<T: Clone>(rows: Vec<&T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .cloned()
        .collect()
}
