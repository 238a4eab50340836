//! The CompletionClient trait definition.

use async_trait::async_trait;

use crate::outcome::CompletionOutcome;
use crate::prompt::Prompt;

/// A backend that turns an assembled prompt into a model reply.
///
/// Implementations send exactly one request per call, never retry, and never
/// touch any store. This trait is object-safe and can be used with
/// `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Ask the model for a reply to `prompt.message`, given the system prompt
    /// and prior history carried in the prompt.
    async fn ask(&self, prompt: &Prompt) -> CompletionOutcome;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;

    /// Check if the backend is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
