//! Project row model.

use crewhub_core::error::CoreError;
use crewhub_core::project_status::ProjectStatus;
use crewhub_core::recruitment::Project;
use crewhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub team_size: i32,
    pub current_members: i32,
    pub deadline: Option<Timestamp>,
    pub project_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ProjectRow> for Project {
    type Error = CoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let project_status = ProjectStatus::from_name(&row.project_status).map_err(|_| {
            CoreError::DataIntegrity(format!(
                "Project {} has unknown status '{}'",
                row.id, row.project_status
            ))
        })?;
        Ok(Project {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            description: row.description,
            category: row.category,
            thumbnail_url: row.thumbnail_url,
            team_size: row.team_size,
            current_members: row.current_members,
            deadline: row.deadline,
            project_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
