use crewhub_core::error::CoreError;
use crewhub_core::recruitment::StoreError;

/// Failure of a PostgreSQL-backed store call.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain rule detected while reading or writing rows.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError for DbError {
    fn into_core(self) -> Result<CoreError, Self> {
        match self {
            DbError::Core(core) => Ok(core),
            other => Err(other),
        }
    }
}

/// Whether `err` is a violation of the named constraint or unique index.
pub(crate) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}
