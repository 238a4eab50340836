//! Delayed brain implementation - wraps another client with artificial delay.

use std::time::Duration;

use brain_core::{async_trait, CompletionClient, CompletionOutcome, Prompt};
use tokio::time::sleep;

/// A client that wraps another client and adds artificial delay.
///
/// Useful for testing timeout handling and simulating model latency.
pub struct DelayedBrain<B: CompletionClient> {
    inner: B,
    delay: Duration,
}

impl<B: CompletionClient> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given client with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a client with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped client.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: CompletionClient> CompletionClient for DelayedBrain<B> {
    async fn ask(&self, prompt: &Prompt) -> CompletionOutcome {
        sleep(self.delay).await;
        self.inner.ask(prompt).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoBrain;
    use brain_core::PromptAssembler;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_brain() {
        let brain = DelayedBrain::with_millis(EchoBrain::new(), 100);
        let prompt = PromptAssembler::default().assemble("", "", &[], "test");

        let start = Instant::now();
        let outcome = brain.ask(&prompt).await;
        let elapsed = start.elapsed();

        assert_eq!(outcome, CompletionOutcome::Success("test".to_string()));
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_brain_name() {
        let brain = DelayedBrain::with_millis(EchoBrain::new(), 0);
        assert_eq!(brain.name(), "DelayedBrain");
    }
}
