//! Error types for conversation handling.
//!
//! None of these reach the transport: the controller logs them and answers
//! with the fixed apology.

use brain_core::BrainError;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while handling one inbound message.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A store read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// Stored data could not be decoded.
    #[error("brain error: {0}")]
    Brain(#[from] BrainError),

    /// The conversation is in chat but the profile lacks a selection.
    #[error("profile for user {0} is incomplete")]
    IncompleteProfile(i64),

    /// A stored subject or difficulty code is not in the catalog.
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: i64 },

    /// The warning log could not be read.
    #[error("diagnostics unavailable: {0}")]
    Diagnostics(#[source] std::io::Error),
}
