//! A client that never succeeds.

use brain_core::{async_trait, CompletionClient, CompletionOutcome, FailureReason, Prompt};

/// Answers every request with the same failure.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    reason: FailureReason,
}

impl FailingBrain {
    pub fn new(reason: FailureReason) -> Self {
        Self { reason }
    }

    /// Fails as if the endpoint returned `code`.
    pub fn with_status(code: u16) -> Self {
        Self::new(FailureReason::BadStatus(code))
    }

    /// Fails as if the connection was refused.
    pub fn unreachable() -> Self {
        Self::new(FailureReason::Network("connection refused".to_string()))
    }
}

#[async_trait]
impl CompletionClient for FailingBrain {
    async fn ask(&self, _prompt: &Prompt) -> CompletionOutcome {
        CompletionOutcome::Failure(self.reason.clone())
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
