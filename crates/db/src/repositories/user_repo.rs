//! Repository for the `users` table (profile columns only).

use crewhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UserProfileRow};

const PROFILE_COLUMNS: &str = "id, display_name, avatar_url";

pub struct UserRepo;

impl UserRepo {
    /// Insert a user, returning its public profile.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<UserProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (display_name, avatar_url, role)
             VALUES ($1, $2, $3)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, UserProfileRow>(&query)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Public profiles for `ids`. Unknown ids are skipped.
    pub async fn find_profiles(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserProfileRow>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, UserProfileRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
