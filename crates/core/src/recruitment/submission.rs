//! Applicant-side operations: submit, withdraw, and read one application.

use crate::application::{
    invalid_transition, validate_payload, validate_transition, ApplicationPayload,
    ApplicationStatus,
};
use crate::clock::Clock;
use crate::error::CoreError;
use crate::types::DbId;

use super::model::{Actor, Application, CreateApplication};
use super::service::{integrity_failure, RecruitmentService};
use super::store::{RecruitmentStore, WriteOutcome};

impl<S: RecruitmentStore, C: Clock> RecruitmentService<S, C> {
    /// Submit a new `pending` application.
    ///
    /// Capacity is not checked here; a full team only blocks acceptance.
    pub async fn submit_application(
        &self,
        project_id: DbId,
        applicant_id: DbId,
        payload: ApplicationPayload,
    ) -> Result<Application, S::Error> {
        let payload = payload.normalized();
        validate_payload(&payload)?;

        let project = self.load_project(project_id).await?;
        if project.project_status.is_terminal() {
            return Err(CoreError::ProjectClosed {
                project_id,
                status: project.project_status.to_string(),
            }
            .into());
        }
        if project.author_id == applicant_id {
            return Err(CoreError::Validation(
                "Project owners cannot apply to their own project".to_string(),
            )
            .into());
        }
        if self
            .store
            .find_open_application(project_id, applicant_id)
            .await?
            .is_some()
        {
            return Err(CoreError::DuplicateApplication {
                project_id,
                applicant_id,
            }
            .into());
        }

        // The store re-checks uniqueness atomically; the lookup above only
        // spares a write in the common case.
        let input = CreateApplication {
            project_id,
            applicant_id,
            payload,
        };
        let application = self.store.insert_application(&input, self.now()).await?;

        tracing::info!(
            application_id = application.id,
            project_id,
            applicant_id,
            "Application submitted"
        );
        Ok(application)
    }

    /// Withdraw an application. Only its applicant may do this.
    ///
    /// Withdrawing an accepted application frees its slot.
    pub async fn withdraw_application(
        &self,
        application_id: DbId,
        actor: &Actor,
    ) -> Result<Application, S::Error> {
        let application = self.load_application(application_id).await?;
        if application.applicant_id != actor.user_id {
            return Err(CoreError::NotAuthor {
                actor_id: actor.user_id,
                action: "withdraw this application",
            }
            .into());
        }
        let from = application.status;
        validate_transition(from, ApplicationStatus::Withdrawn)?;

        let outcome = self
            .store
            .commit_withdrawal(application_id, application.project_id, from, self.now())
            .await
            .map_err(log_store_failure)?;

        match outcome {
            WriteOutcome::Committed(withdrawn) => {
                tracing::info!(
                    application_id,
                    project_id = withdrawn.project_id,
                    user_id = actor.user_id,
                    from = %from,
                    "Application withdrawn"
                );
                Ok(withdrawn)
            }
            WriteOutcome::StatusChanged(current) => {
                tracing::warn!(
                    application_id,
                    expected = %from,
                    current = %current,
                    "Withdrawal lost a race with another write"
                );
                Err(invalid_transition(current, ApplicationStatus::Withdrawn).into())
            }
            WriteOutcome::Missing | WriteOutcome::CapacityExhausted => Err(CoreError::NotFound {
                entity: "Application",
                id: application_id,
            }
            .into()),
        }
    }

    /// Fetch one application. Visible to its applicant, the project owner
    /// and administrators.
    pub async fn get_application(
        &self,
        application_id: DbId,
        actor: &Actor,
    ) -> Result<Application, S::Error> {
        let application = self.load_application(application_id).await?;
        if application.applicant_id == actor.user_id || actor.is_admin() {
            return Ok(application);
        }
        let project = self.load_project(application.project_id).await?;
        if actor.can_manage(&project) {
            return Ok(application);
        }
        Err(CoreError::NotAuthor {
            actor_id: actor.user_id,
            action: "view this application",
        }
        .into())
    }
}

/// Pass store errors through, logging any integrity violation they carry.
pub(crate) fn log_store_failure<E: super::store::StoreError>(err: E) -> E {
    match err.into_core() {
        Ok(core) => integrity_failure(core).into(),
        Err(other) => other,
    }
}
