//! Application row model.

use crewhub_core::application::{ApplicationPayload, ApplicationStatus};
use crewhub_core::error::CoreError;
use crewhub_core::recruitment::Application;
use crewhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: DbId,
    pub project_id: DbId,
    pub applicant_id: DbId,
    pub status: String,
    pub motivation: String,
    pub relevant_experience: Option<String>,
    pub available_time: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub additional_info: Option<String>,
    pub applied_at: Timestamp,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub withdrawn_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl ApplicationRow {
    pub fn parsed_status(&self) -> Result<ApplicationStatus, CoreError> {
        ApplicationStatus::from_name(&self.status).map_err(|_| {
            CoreError::DataIntegrity(format!(
                "Application {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = CoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row.parsed_status()?;
        Ok(Application {
            id: row.id,
            project_id: row.project_id,
            applicant_id: row.applicant_id,
            status,
            payload: ApplicationPayload {
                motivation: row.motivation,
                relevant_experience: row.relevant_experience,
                available_time: row.available_time,
                portfolio_url: row.portfolio_url,
                github_url: row.github_url,
                additional_info: row.additional_info,
            },
            applied_at: row.applied_at,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
            review_notes: row.review_notes,
            rejection_reason: row.rejection_reason,
            withdrawn_at: row.withdrawn_at,
            updated_at: row.updated_at,
        })
    }
}

/// Per-status count, as returned by a `GROUP BY status` query.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}
