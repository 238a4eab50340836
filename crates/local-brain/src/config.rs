//! Configuration for LocalBrain.

use std::env;
use std::time::Duration;

use brain_core::BrainError;

/// Default completion endpoint (LM Studio).
pub const DEFAULT_API_URL: &str = "http://localhost:1234/v1/chat/completions";

/// Configuration for LocalBrain.
#[derive(Debug, Clone)]
pub struct LocalBrainConfig {
    /// Full URL of the chat completions endpoint.
    pub api_url: String,

    /// Optional bearer key.
    pub api_key: Option<String>,

    /// Model name; omitted from requests when unset.
    pub model: Option<String>,

    /// Temperature for generation.
    pub temperature: f32,

    /// Maximum tokens for the response.
    pub max_tokens: u32,

    /// HTTP timeout for a single request.
    pub timeout: Duration,
}

impl Default for LocalBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: None,
            temperature: 1.0,
            max_tokens: 250,
            timeout: Duration::from_secs(60),
        }
    }
}

impl LocalBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `LOCAL_BRAIN_API_URL` - Endpoint (default: http://localhost:1234/v1/chat/completions)
    /// - `LOCAL_BRAIN_API_KEY` - Bearer key (default: none)
    /// - `LOCAL_BRAIN_MODEL` - Model name (default: none)
    /// - `LOCAL_BRAIN_TEMPERATURE` - Temperature (default: 1.0)
    /// - `LOCAL_BRAIN_MAX_TOKENS` - Max response tokens (default: 250)
    /// - `LOCAL_BRAIN_TIMEOUT_SECS` - Request timeout (default: 60)
    pub fn from_env() -> Result<Self, BrainError> {
        let defaults = Self::default();

        let api_url = env::var("LOCAL_BRAIN_API_URL").unwrap_or(defaults.api_url);
        if api_url.trim().is_empty() {
            return Err(BrainError::Configuration(
                "LOCAL_BRAIN_API_URL is empty".to_string(),
            ));
        }

        let api_key = env::var("LOCAL_BRAIN_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let model = env::var("LOCAL_BRAIN_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let temperature = env::var("LOCAL_BRAIN_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.temperature);

        let max_tokens = env::var("LOCAL_BRAIN_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tokens);

        let timeout = env::var("LOCAL_BRAIN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            api_url,
            api_key,
            model,
            temperature,
            max_tokens,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> LocalBrainConfigBuilder {
        LocalBrainConfigBuilder::default()
    }
}

/// Builder for LocalBrainConfig.
#[derive(Debug, Default)]
pub struct LocalBrainConfigBuilder {
    config: LocalBrainConfig,
}

impl LocalBrainConfigBuilder {
    /// Set the endpoint URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the bearer key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = temp;
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LocalBrainConfig {
        self.config
    }
}
