//! Echo brain implementation - echoes the new user message back.

use brain_core::{async_trait, CompletionClient, CompletionOutcome, Prompt};

/// A simple client that answers with the text it was asked.
///
/// Useful for testing the message flow without any model.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <new message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl CompletionClient for EchoBrain {
    async fn ask(&self, prompt: &Prompt) -> CompletionOutcome {
        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, prompt.message),
            None => prompt.message.clone(),
        };
        CompletionOutcome::Success(text)
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
