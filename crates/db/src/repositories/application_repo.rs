//! Repository for the `applications` table.

use crewhub_core::recruitment::{CreateApplication, ReviewStamp};
use crewhub_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::application::{ApplicationRow, StatusCountRow};

/// Column list for applications queries.
const COLUMNS: &str = "id, project_id, applicant_id, status, motivation, relevant_experience, \
    available_time, portfolio_url, github_url, additional_info, applied_at, reviewed_by, \
    reviewed_at, review_notes, rejection_reason, withdrawn_at, updated_at";

/// Name of the partial unique index allowing one open application per
/// (project, applicant).
pub const OPEN_APPLICATION_INDEX: &str = "uq_applications_open_per_applicant";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a pending application, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
        now: Timestamp,
    ) -> Result<ApplicationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications
                (project_id, applicant_id, status, motivation, relevant_experience,
                 available_time, portfolio_url, github_url, additional_info,
                 applied_at, updated_at)
             VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING {COLUMNS}"
        );
        let payload = &input.payload;
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(input.project_id)
            .bind(input.applicant_id)
            .bind(&payload.motivation)
            .bind(&payload.relevant_experience)
            .bind(&payload.available_time)
            .bind(&payload.portfolio_url)
            .bind(&payload.github_url)
            .bind(&payload.additional_info)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The applicant's non-withdrawn application to the project, if any.
    pub async fn find_open(
        pool: &PgPool,
        project_id: DbId,
        applicant_id: DbId,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE project_id = $1 AND applicant_id = $2 AND status <> 'withdrawn'"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(project_id)
            .bind(applicant_id)
            .fetch_optional(pool)
            .await
    }

    /// Count the project's applications grouped by status.
    pub async fn count_by_status(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<StatusCountRow>, sqlx::Error> {
        sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count FROM applications
             WHERE project_id = $1
             GROUP BY status",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Applications sent by `applicant_id`, most recent first.
    pub async fn list_by_applicant(
        pool: &PgPool,
        applicant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE applicant_id = $1
             ORDER BY applied_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(applicant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_applicant(pool: &PgPool, applicant_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE applicant_id = $1")
                .bind(applicant_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Every application to the given projects, most recent first.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications
             WHERE project_id = ANY($1)
             ORDER BY applied_at DESC, id DESC"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Move a pending application of `project_id` to `status` and stamp the
    /// reviewer fields. Returns `None` if it is no longer pending.
    pub async fn mark_reviewed(
        conn: &mut PgConnection,
        id: DbId,
        project_id: DbId,
        status: &str,
        stamp: &ReviewStamp,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE applications
             SET status = $3, reviewed_by = $4, reviewed_at = $5,
                 review_notes = $6, rejection_reason = $7, updated_at = $5
             WHERE id = $1 AND project_id = $2 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(project_id)
            .bind(status)
            .bind(stamp.reviewer_id)
            .bind(stamp.reviewed_at)
            .bind(&stamp.review_notes)
            .bind(&stamp.rejection_reason)
            .fetch_optional(conn)
            .await
    }

    /// Move an application from `from` to `withdrawn`. Returns `None` if its
    /// status is no longer `from`.
    pub async fn mark_withdrawn(
        conn: &mut PgConnection,
        id: DbId,
        project_id: DbId,
        from: &str,
        now: Timestamp,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE applications
             SET status = 'withdrawn', withdrawn_at = $4, updated_at = $4
             WHERE id = $1 AND project_id = $2 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(project_id)
            .bind(from)
            .bind(now)
            .fetch_optional(conn)
            .await
    }
}
