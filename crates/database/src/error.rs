//! Database error types.

use brain_core::BrainError;
use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored value could not be decoded (unknown role code or state name).
    #[error("corrupt record: {0}")]
    Corrupt(#[from] BrainError),

    /// Simulated failure from the volatile backend.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

impl DatabaseError {
    pub(crate) fn user_not_found(telegram_id: i64) -> Self {
        DatabaseError::NotFound {
            entity: "User",
            id: telegram_id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
