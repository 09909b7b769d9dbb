//! User profile row model.

use crewhub_core::recruitment::UserProfile;
use crewhub_core::types::DbId;
use sqlx::FromRow;

/// Public columns of a `users` row.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub id: DbId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        UserProfile {
            id: row.id,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        }
    }
}

/// DTO for provisioning a user row.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
}
