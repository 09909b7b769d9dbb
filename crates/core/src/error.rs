use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A non-withdrawn application already exists for this applicant and project.
    #[error("Applicant {applicant_id} already has an open application for project {project_id}")]
    DuplicateApplication { project_id: DbId, applicant_id: DbId },

    /// The requested status change is not an edge of the lifecycle graph.
    #[error("Cannot transition {entity} from '{from}' to '{to}'")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    /// The actor is neither the record's author nor an administrator.
    #[error("User {actor_id} is not allowed to {action}")]
    NotAuthor { actor_id: DbId, action: &'static str },

    /// Every slot on the project's team is already taken.
    #[error("Project {project_id} has no remaining slots (team size {team_size})")]
    CapacityExceeded { project_id: DbId, team_size: i32 },

    /// The owner has completed or cancelled the project.
    #[error("Project {project_id} is {status} and no longer accepts applications")]
    ProjectClosed { project_id: DbId, status: String },

    /// Stored data violates an invariant. Never recoverable by the caller.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),
}
