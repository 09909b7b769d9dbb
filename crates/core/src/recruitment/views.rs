//! Applicant-facing and owner-facing projections over the same
//! application rows. Read-only.

use std::collections::{HashMap, HashSet};

use crate::capacity::ApplicationCounts;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::pagination::{Page, PageRequest};
use crate::types::DbId;

use super::model::{
    ApplicantApplicationView, DerivedProjectView, OwnerApplicationView, OwnerProjectView,
    ProjectSummary, UserProfile,
};
use super::service::{integrity_failure, RecruitmentService};
use super::store::RecruitmentStore;

impl<S: RecruitmentStore, C: Clock> RecruitmentService<S, C> {
    /// "My applications": every application sent by `applicant_id`, most
    /// recent first, each with its project's public summary.
    pub async fn list_applications_for_applicant(
        &self,
        applicant_id: DbId,
        request: PageRequest,
    ) -> Result<Page<ApplicantApplicationView>, S::Error> {
        let (applications, total) = self
            .store
            .list_applications_by_applicant(applicant_id, request.limit(), request.offset())
            .await?;

        let project_ids = distinct(applications.iter().map(|a| a.project_id));
        let projects: HashMap<DbId, _> = self
            .store
            .find_projects(&project_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let owner_ids = distinct(projects.values().map(|p| p.author_id));
        let owners = self.profiles_by_id(&owner_ids).await?;

        let mut accepted: HashMap<DbId, i64> = HashMap::with_capacity(projects.len());
        for project in projects.values() {
            accepted.insert(project.id, self.recount(project).await?.accepted);
        }

        let now = self.now();
        let mut items = Vec::with_capacity(applications.len());
        for application in applications {
            let project = projects.get(&application.project_id).ok_or_else(|| {
                integrity_failure(CoreError::DataIntegrity(format!(
                    "Application {} references missing project {}",
                    application.id, application.project_id
                )))
            })?;
            let summary = ProjectSummary::new(
                project,
                owners.get(&project.author_id),
                accepted.get(&project.id).copied().unwrap_or_default(),
                now,
            );
            items.push(ApplicantApplicationView {
                application,
                project: summary,
            });
        }

        Ok(Page::new(items, request, total))
    }

    /// "My projects' applications": every project authored by `owner_id`,
    /// newest first, each with all of its applications and their senders.
    /// Projects are paginated; the nested applications are not.
    pub async fn list_projects_with_applications_for_owner(
        &self,
        owner_id: DbId,
        request: PageRequest,
    ) -> Result<Page<OwnerProjectView>, S::Error> {
        let (projects, total) = self
            .store
            .list_projects_by_author(owner_id, request.limit(), request.offset())
            .await?;

        let project_ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let applications = self
            .store
            .list_applications_for_projects(&project_ids)
            .await?;

        let applicant_ids = distinct(applications.iter().map(|a| a.applicant_id));
        let applicants = self.profiles_by_id(&applicant_ids).await?;

        let mut by_project: HashMap<DbId, Vec<OwnerApplicationView>> = HashMap::new();
        for application in applications {
            let applicant = applicants.get(&application.applicant_id).cloned();
            by_project
                .entry(application.project_id)
                .or_default()
                .push(OwnerApplicationView {
                    application,
                    applicant,
                });
        }

        let now = self.now();
        let mut items = Vec::with_capacity(projects.len());
        for project in projects {
            let applications = by_project.remove(&project.id).unwrap_or_default();
            let counts = ApplicationCounts::tally(applications.iter().map(|v| v.application.status));
            let derived =
                DerivedProjectView::compute(&project, &counts, now).map_err(integrity_failure)?;
            items.push(OwnerProjectView {
                project,
                derived,
                applications,
            });
        }

        Ok(Page::new(items, request, total))
    }

    async fn profiles_by_id(
        &self,
        user_ids: &[DbId],
    ) -> Result<HashMap<DbId, UserProfile>, S::Error> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .store
            .find_user_profiles(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }
}

/// Unique ids in first-seen order.
fn distinct(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
