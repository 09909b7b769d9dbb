//! Persistence seam of the recruitment domain.
//!
//! A [`RecruitmentStore`] owns the atomicity guarantees: every `commit_*`
//! method is a single conditional write that either applies completely or
//! reports why it did not. The service decides, the store guards.

use std::future::Future;

use crate::application::ApplicationStatus;
use crate::capacity::ApplicationCounts;
use crate::error::CoreError;
use crate::project_status::ProjectStatus;
use crate::types::{DbId, Timestamp};

use super::model::{
    Application, CreateApplication, CreateProject, Project, ReviewStamp, UserProfile,
};

/// Result of a conditional application write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The write was applied; the updated row is returned.
    Committed(Application),
    /// The application no longer had the expected status. Carries the status
    /// observed at write time.
    StatusChanged(ApplicationStatus),
    /// The project had no open slot when the write was attempted.
    CapacityExhausted,
    /// The application or its project does not exist.
    Missing,
}

/// Error type of a [`RecruitmentStore`].
///
/// Domain failures travel through the backend error so the service can use
/// `?` on both; `into_core` lets callers recover them.
pub trait StoreError: From<CoreError> + std::error::Error + Send + Sync + 'static {
    /// Return the wrapped domain error, or `self` for backend failures.
    fn into_core(self) -> Result<CoreError, Self>;
}

impl StoreError for CoreError {
    fn into_core(self) -> Result<CoreError, Self> {
        Ok(self)
    }
}

/// Storage backend for projects, applications and user profiles.
///
/// Implementations must make each `commit_*` call atomic: the status guard,
/// the capacity guard and the member-counter mutation succeed or fail
/// together.
pub trait RecruitmentStore: Send + Sync {
    /// Backend error. Domain failures detected by the store (duplicates,
    /// integrity violations) are raised through `From<CoreError>`.
    type Error: StoreError;

    /// Verify the backend is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    // -- projects -----------------------------------------------------------

    /// Insert a recruiting project with no members.
    fn create_project(
        &self,
        author_id: DbId,
        input: &CreateProject,
        now: Timestamp,
    ) -> impl Future<Output = Result<Project, Self::Error>> + Send;

    fn find_project(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send;

    /// Fetch every project whose id is in `ids`. Unknown ids are skipped.
    fn find_projects(
        &self,
        ids: &[DbId],
    ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send;

    /// Set the stored status if it is still `expected`. Returns `None` when
    /// the project is missing or its status changed in the meantime.
    fn set_project_status(
        &self,
        id: DbId,
        expected: ProjectStatus,
        status: ProjectStatus,
        now: Timestamp,
    ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send;

    /// Projects authored by `author_id`, newest first, plus the total count.
    fn list_projects_by_author(
        &self,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<(Vec<Project>, i64), Self::Error>> + Send;

    // -- applications -------------------------------------------------------

    fn find_application(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send;

    /// The applicant's non-withdrawn application to the project, if any.
    fn find_open_application(
        &self,
        project_id: DbId,
        applicant_id: DbId,
    ) -> impl Future<Output = Result<Option<Application>, Self::Error>> + Send;

    /// Count the project's applications per status.
    fn count_applications(
        &self,
        project_id: DbId,
    ) -> impl Future<Output = Result<ApplicationCounts, Self::Error>> + Send;

    /// Insert a pending application. Fails with
    /// [`CoreError::DuplicateApplication`] if an open one already exists.
    fn insert_application(
        &self,
        input: &CreateApplication,
        now: Timestamp,
    ) -> impl Future<Output = Result<Application, Self::Error>> + Send;

    /// Atomically move a `pending` application to `accepted` and increment
    /// the project's member counter, provided a slot is still open.
    fn commit_acceptance(
        &self,
        application_id: DbId,
        project_id: DbId,
        stamp: &ReviewStamp,
    ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send;

    /// Atomically move a `pending` application to `rejected`.
    fn commit_rejection(
        &self,
        application_id: DbId,
        stamp: &ReviewStamp,
    ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send;

    /// Atomically move an application from `from` to `withdrawn`. When `from`
    /// is `accepted` the project's member counter is decremented in the same
    /// write.
    fn commit_withdrawal(
        &self,
        application_id: DbId,
        project_id: DbId,
        from: ApplicationStatus,
        now: Timestamp,
    ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send;

    /// Applications sent by `applicant_id`, most recent first, plus the total.
    fn list_applications_by_applicant(
        &self,
        applicant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<(Vec<Application>, i64), Self::Error>> + Send;

    /// Every application (any status) to any project in `project_ids`, most
    /// recent first.
    fn list_applications_for_projects(
        &self,
        project_ids: &[DbId],
    ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send;

    // -- users --------------------------------------------------------------

    /// Public profiles for `user_ids`. Unknown ids are skipped.
    fn find_user_profiles(
        &self,
        user_ids: &[DbId],
    ) -> impl Future<Output = Result<Vec<UserProfile>, Self::Error>> + Send;
}
