//! Error types for brain construction and configuration.

use thiserror::Error;

/// Errors raised while building or configuring a completion backend.
///
/// Failures of an individual remote call are not errors; they are reported
/// through [`crate::CompletionOutcome::Failure`].
#[derive(Debug, Error)]
pub enum BrainError {
    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An unknown role code was read back from storage.
    #[error("unknown role code: {0}")]
    UnknownRole(i64),

    /// An unknown conversation state name was read back from storage.
    #[error("unknown conversation state: {0}")]
    UnknownState(String),
}
