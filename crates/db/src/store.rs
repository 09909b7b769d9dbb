//! [`RecruitmentStore`] over PostgreSQL.
//!
//! Every conditional write runs in one transaction. Counter updates always
//! come first so concurrent writers lock the project row before any
//! application row.

use crewhub_core::application::ApplicationStatus;
use crewhub_core::capacity::ApplicationCounts;
use crewhub_core::error::CoreError;
use crewhub_core::project_status::ProjectStatus;
use crewhub_core::recruitment::{
    Application, CreateApplication, CreateProject, Project, RecruitmentStore, ReviewStamp,
    UserProfile, WriteOutcome,
};
use crewhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::{violates, DbError};
use crate::models::application::ApplicationRow;
use crate::repositories::application_repo::OPEN_APPLICATION_INDEX;
use crate::repositories::{ApplicationRepo, ProjectRepo, UserRepo};

/// PostgreSQL-backed recruitment store.
#[derive(Debug, Clone)]
pub struct PgRecruitmentStore {
    pool: PgPool,
}

impl PgRecruitmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Explain why a guarded application update touched no row.
    async fn explain_miss(
        &self,
        application_id: DbId,
        project_id: DbId,
    ) -> Result<WriteOutcome, DbError> {
        match ApplicationRepo::find_by_id(&self.pool, application_id).await? {
            Some(row) if row.project_id == project_id => {
                Ok(WriteOutcome::StatusChanged(row.parsed_status()?))
            }
            _ => Ok(WriteOutcome::Missing),
        }
    }
}

fn committed(row: ApplicationRow) -> Result<WriteOutcome, DbError> {
    Ok(WriteOutcome::Committed(Application::try_from(row)?))
}

impl RecruitmentStore for PgRecruitmentStore {
    type Error = DbError;

    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_project(
        &self,
        author_id: DbId,
        input: &CreateProject,
        now: Timestamp,
    ) -> Result<Project, DbError> {
        let row = ProjectRepo::create(&self.pool, author_id, input, now).await?;
        Ok(row.try_into()?)
    }

    async fn find_project(&self, id: DbId) -> Result<Option<Project>, DbError> {
        match ProjectRepo::find_by_id(&self.pool, id).await? {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn find_projects(&self, ids: &[DbId]) -> Result<Vec<Project>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = ProjectRepo::find_by_ids(&self.pool, ids).await?;
        Ok(rows
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn set_project_status(
        &self,
        id: DbId,
        expected: ProjectStatus,
        status: ProjectStatus,
        now: Timestamp,
    ) -> Result<Option<Project>, DbError> {
        let row =
            ProjectRepo::set_status(&self.pool, id, expected.as_str(), status.as_str(), now).await?;
        match row {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn list_projects_by_author(
        &self,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Project>, i64), DbError> {
        let rows = ProjectRepo::list_by_author(&self.pool, author_id, limit, offset).await?;
        let total = ProjectRepo::count_by_author(&self.pool, author_id).await?;
        let projects = rows
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<_, _>>()?;
        Ok((projects, total))
    }

    async fn find_application(&self, id: DbId) -> Result<Option<Application>, DbError> {
        match ApplicationRepo::find_by_id(&self.pool, id).await? {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn find_open_application(
        &self,
        project_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<Application>, DbError> {
        match ApplicationRepo::find_open(&self.pool, project_id, applicant_id).await? {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn count_applications(&self, project_id: DbId) -> Result<ApplicationCounts, DbError> {
        let mut counts = ApplicationCounts::default();
        for row in ApplicationRepo::count_by_status(&self.pool, project_id).await? {
            let status = ApplicationStatus::from_name(&row.status).map_err(|_| {
                CoreError::DataIntegrity(format!(
                    "Project {project_id} has applications with unknown status '{}'",
                    row.status
                ))
            })?;
            counts.record(status, row.count);
        }
        Ok(counts)
    }

    async fn insert_application(
        &self,
        input: &CreateApplication,
        now: Timestamp,
    ) -> Result<Application, DbError> {
        match ApplicationRepo::create(&self.pool, input, now).await {
            Ok(row) => Ok(row.try_into()?),
            Err(err) if violates(&err, OPEN_APPLICATION_INDEX) => {
                Err(CoreError::DuplicateApplication {
                    project_id: input.project_id,
                    applicant_id: input.applicant_id,
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn commit_acceptance(
        &self,
        application_id: DbId,
        project_id: DbId,
        stamp: &ReviewStamp,
    ) -> Result<WriteOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        if !ProjectRepo::claim_slot(&mut *tx, project_id, stamp.reviewed_at).await? {
            tx.rollback().await?;
            return match ProjectRepo::find_by_id(&self.pool, project_id).await? {
                Some(_) => Ok(WriteOutcome::CapacityExhausted),
                None => Ok(WriteOutcome::Missing),
            };
        }

        let accepted = ApplicationRepo::mark_reviewed(
            &mut *tx,
            application_id,
            project_id,
            ApplicationStatus::Accepted.as_str(),
            stamp,
        )
        .await?;

        match accepted {
            Some(row) => {
                tx.commit().await?;
                committed(row)
            }
            None => {
                tx.rollback().await?;
                self.explain_miss(application_id, project_id).await
            }
        }
    }

    async fn commit_rejection(
        &self,
        application_id: DbId,
        stamp: &ReviewStamp,
    ) -> Result<WriteOutcome, DbError> {
        let Some(current) = ApplicationRepo::find_by_id(&self.pool, application_id).await? else {
            return Ok(WriteOutcome::Missing);
        };

        let mut conn = self.pool.acquire().await?;
        let rejected = ApplicationRepo::mark_reviewed(
            &mut *conn,
            application_id,
            current.project_id,
            ApplicationStatus::Rejected.as_str(),
            stamp,
        )
        .await?;

        match rejected {
            Some(row) => committed(row),
            None => self.explain_miss(application_id, current.project_id).await,
        }
    }

    async fn commit_withdrawal(
        &self,
        application_id: DbId,
        project_id: DbId,
        from: ApplicationStatus,
        now: Timestamp,
    ) -> Result<WriteOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        if from == ApplicationStatus::Accepted {
            let released = ProjectRepo::release_slot(&mut *tx, project_id, now).await?;
            if !released {
                tx.rollback().await?;
                return match ProjectRepo::find_by_id(&self.pool, project_id).await? {
                    Some(project) => Err(CoreError::DataIntegrity(format!(
                        "Project {project_id} has an accepted application {application_id} \
                         but current_members is {}",
                        project.current_members
                    ))
                    .into()),
                    None => Ok(WriteOutcome::Missing),
                };
            }
        }

        let withdrawn =
            ApplicationRepo::mark_withdrawn(&mut *tx, application_id, project_id, from.as_str(), now)
                .await?;

        match withdrawn {
            Some(row) => {
                tx.commit().await?;
                committed(row)
            }
            None => {
                tx.rollback().await?;
                self.explain_miss(application_id, project_id).await
            }
        }
    }

    async fn list_applications_by_applicant(
        &self,
        applicant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Application>, i64), DbError> {
        let rows = ApplicationRepo::list_by_applicant(&self.pool, applicant_id, limit, offset).await?;
        let total = ApplicationRepo::count_by_applicant(&self.pool, applicant_id).await?;
        let applications = rows
            .into_iter()
            .map(Application::try_from)
            .collect::<Result<_, _>>()?;
        Ok((applications, total))
    }

    async fn list_applications_for_projects(
        &self,
        project_ids: &[DbId],
    ) -> Result<Vec<Application>, DbError> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = ApplicationRepo::list_for_projects(&self.pool, project_ids).await?;
        Ok(rows
            .into_iter()
            .map(Application::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn find_user_profiles(&self, user_ids: &[DbId]) -> Result<Vec<UserProfile>, DbError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = UserRepo::find_profiles(&self.pool, user_ids).await?;
        Ok(rows.into_iter().map(UserProfile::from).collect())
    }
}
