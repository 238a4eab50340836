//! Tagged result of a single completion request.

use std::fmt;

/// Why a completion request produced no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Transport-level failure, including timeouts.
    Network(String),
    /// The endpoint answered with a status other than 200.
    BadStatus(u16),
    /// A 200 answer whose body could not be read as a completion.
    MalformedResponse(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Network(msg) => write!(f, "network error: {}", msg),
            FailureReason::BadStatus(code) => write!(f, "bad status: {}", code),
            FailureReason::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// Outcome of [`crate::CompletionClient::ask`].
///
/// Failures are returned by value so the caller decides what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The model produced a reply.
    Success(String),
    /// The request failed; nothing should be persisted.
    Failure(FailureReason),
}

impl CompletionOutcome {
    /// Shorthand for a network failure.
    pub fn network(msg: impl Into<String>) -> Self {
        CompletionOutcome::Failure(FailureReason::Network(msg.into()))
    }

    /// Shorthand for a non-200 status.
    pub fn bad_status(code: u16) -> Self {
        CompletionOutcome::Failure(FailureReason::BadStatus(code))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }
}
