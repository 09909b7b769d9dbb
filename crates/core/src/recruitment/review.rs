//! Review workflow: the owner's accept / reject decision.
//!
//! Every failure leaves the application and its project untouched. An
//! accept is decided against a fresh recount and then written with a guard
//! that re-checks capacity and status inside the store, so concurrent
//! accepts for the last slot resolve to exactly one winner.

use crate::application::{
    invalid_transition, validate_review, ApplicationStatus, ReviewApplication, ReviewDecision,
};
use crate::clock::Clock;
use crate::error::CoreError;
use crate::types::DbId;

use super::model::{Actor, Application, Project, ReviewStamp};
use super::service::RecruitmentService;
use super::store::{RecruitmentStore, WriteOutcome};
use super::submission::log_store_failure;

impl<S: RecruitmentStore, C: Clock> RecruitmentService<S, C> {
    /// Accept or reject a pending application.
    pub async fn review_application(
        &self,
        application_id: DbId,
        actor: &Actor,
        review: ReviewApplication,
    ) -> Result<Application, S::Error> {
        let application = self.load_application(application_id).await?;
        let project = self.load_project(application.project_id).await?;
        if !actor.can_manage(&project) {
            return Err(CoreError::NotAuthor {
                actor_id: actor.user_id,
                action: "review applications for this project",
            }
            .into());
        }

        let target = review.decision.target_status();
        if application.status != ApplicationStatus::Pending {
            return Err(invalid_transition(application.status, target).into());
        }
        validate_review(&review)?;

        let stamp = ReviewStamp {
            reviewer_id: actor.user_id,
            reviewed_at: self.now(),
            review_notes: review.review_notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            rejection_reason: match review.decision {
                ReviewDecision::Accept => None,
                ReviewDecision::Reject => review
                    .rejection_reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
            },
        };

        match review.decision {
            ReviewDecision::Accept => self.accept(&application, &project, &stamp).await,
            ReviewDecision::Reject => self.reject(&application, &stamp).await,
        }
    }

    async fn accept(
        &self,
        application: &Application,
        project: &Project,
        stamp: &ReviewStamp,
    ) -> Result<Application, S::Error> {
        let capacity_exceeded = || CoreError::CapacityExceeded {
            project_id: project.id,
            team_size: project.team_size,
        };

        let remaining = self.recount_remaining(project).await?;
        if remaining < 1 {
            tracing::info!(
                application_id = application.id,
                project_id = project.id,
                "Accept refused: no slot left"
            );
            return Err(capacity_exceeded().into());
        }

        let outcome = self
            .store
            .commit_acceptance(application.id, project.id, stamp)
            .await
            .map_err(log_store_failure)?;

        match outcome {
            WriteOutcome::Committed(accepted) => {
                tracing::info!(
                    application_id = accepted.id,
                    project_id = project.id,
                    user_id = stamp.reviewer_id,
                    "Application accepted"
                );
                Ok(accepted)
            }
            WriteOutcome::CapacityExhausted => {
                tracing::warn!(
                    application_id = application.id,
                    project_id = project.id,
                    "Accept lost the race for the last slot"
                );
                Err(capacity_exceeded().into())
            }
            WriteOutcome::StatusChanged(current) => {
                tracing::warn!(
                    application_id = application.id,
                    current = %current,
                    "Application changed status before it could be accepted"
                );
                Err(invalid_transition(current, ApplicationStatus::Accepted).into())
            }
            WriteOutcome::Missing => Err(CoreError::NotFound {
                entity: "Application",
                id: application.id,
            }
            .into()),
        }
    }

    async fn reject(
        &self,
        application: &Application,
        stamp: &ReviewStamp,
    ) -> Result<Application, S::Error> {
        let outcome = self
            .store
            .commit_rejection(application.id, stamp)
            .await
            .map_err(log_store_failure)?;

        match outcome {
            WriteOutcome::Committed(rejected) => {
                tracing::info!(
                    application_id = rejected.id,
                    project_id = rejected.project_id,
                    user_id = stamp.reviewer_id,
                    "Application rejected"
                );
                Ok(rejected)
            }
            WriteOutcome::StatusChanged(current) => {
                Err(invalid_transition(current, ApplicationStatus::Rejected).into())
            }
            WriteOutcome::Missing | WriteOutcome::CapacityExhausted => Err(CoreError::NotFound {
                entity: "Application",
                id: application.id,
            }
            .into()),
        }
    }
}
