//! LocalBrain implementation over HTTP.

use brain_core::{
    async_trait, BrainError, CompletionClient, CompletionOutcome, FailureReason, Prompt,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api_types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::LocalBrainConfig;

/// A completion client that talks to an OpenAI-compatible endpoint.
///
/// Each [`ask`](CompletionClient::ask) sends exactly one request. Nothing is
/// remembered between calls; history travels inside the [`Prompt`].
pub struct LocalBrain {
    client: Client,
    config: LocalBrainConfig,
}

impl LocalBrain {
    /// Create a new LocalBrain with the given configuration.
    pub fn new(config: LocalBrainConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                BrainError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "LocalBrain initialized with endpoint: {}, model: {}, timeout: {:?}",
            config.api_url,
            config.model.as_deref().unwrap_or("<server default>"),
            config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create a LocalBrain from environment variables.
    ///
    /// See [`LocalBrainConfig::from_env`] for the recognized variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(LocalBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LocalBrainConfig {
        &self.config
    }

    fn build_request(&self, prompt: &Prompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: prompt.messages(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl CompletionClient for LocalBrain {
    async fn ask(&self, prompt: &Prompt) -> CompletionOutcome {
        let request = self.build_request(prompt);
        debug!(
            "Sending completion request with {} messages",
            request.messages.len()
        );

        let mut builder = self
            .client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let kind = if e.is_timeout() {
                    "timed out"
                } else {
                    "failed"
                };
                warn!("Completion request {}: {}", kind, e);
                return CompletionOutcome::network(format!("request {}: {}", kind, e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion endpoint returned {}: {}", status.as_u16(), body);
            return CompletionOutcome::bad_status(status.as_u16());
        }

        let completion: ChatCompletionResponse = match response.json().await {
            Ok(completion) => completion,
            Err(e) if e.is_timeout() => {
                return CompletionOutcome::network(format!("reading body timed out: {}", e));
            }
            Err(e) => {
                return CompletionOutcome::Failure(FailureReason::MalformedResponse(e.to_string()));
            }
        };

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        match completion.first_content() {
            Some(content) => CompletionOutcome::Success(content.to_string()),
            None => CompletionOutcome::Failure(FailureReason::MalformedResponse(
                "no content in first choice".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "LocalBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::PromptAssembler;

    #[test]
    fn test_brain_name() {
        let brain = LocalBrain::new(LocalBrainConfig::default()).unwrap();
        assert_eq!(brain.name(), "LocalBrain");
    }

    #[test]
    fn test_build_request_uses_config() {
        let config = LocalBrainConfig::builder()
            .temperature(0.2)
            .max_tokens(32)
            .model("tiny")
            .build();
        let brain = LocalBrain::new(config).unwrap();
        let prompt = PromptAssembler::new("P").assemble("S", "D", &[], "hi");

        let request = brain.build_request(&prompt);
        assert_eq!(request.model.as_deref(), Some("tiny"));
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 32);
        assert!(!request.stream);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].content, "PSD");
    }
}
