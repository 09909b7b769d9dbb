//! Repository for the `projects` table.

use crewhub_core::recruitment::CreateProject;
use crewhub_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::project::ProjectRow;

/// Column list for projects queries.
const COLUMNS: &str = "id, author_id, title, description, category, thumbnail_url, \
    team_size, current_members, deadline, project_status, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a recruiting project with no members, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateProject,
        now: Timestamp,
    ) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (author_id, title, description, category, thumbnail_url, team_size,
                 deadline, project_status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'recruiting', $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(author_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.thumbnail_url)
            .bind(input.team_size)
            .bind(input.deadline)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every project in `ids`, ordered by id.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Projects authored by `author_id`, newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE author_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_author(pool: &PgPool, author_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Compare-and-set the stored status. Returns `None` if the project is
    /// missing or no longer has status `expected`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        status: &str,
        now: Timestamp,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET project_status = $3, updated_at = $4
             WHERE id = $1 AND project_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(expected)
            .bind(status)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Take one team slot if any is left.
    ///
    /// Returns `false` when the project is missing or already full. The
    /// row lock taken here serializes concurrent accepts on the project.
    pub async fn claim_slot(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET current_members = current_members + 1, updated_at = $2
             WHERE id = $1 AND current_members < team_size",
        )
        .bind(id)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Give back one team slot. Returns `false` when the project is missing
    /// or its counter is already zero.
    pub async fn release_slot(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET current_members = current_members - 1, updated_at = $2
             WHERE id = $1 AND current_members > 0",
        )
        .bind(id)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
