//! Controller configuration.

use std::path::PathBuf;
use std::time::Duration;

use brain_core::{DEFAULT_PREAMBLE, DEFAULT_REQUEST_MAX_TOKENS};

/// Default bound on one remote completion call.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable settings for a [`crate::ConversationController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Identity allowed to run `/debug`. `None` disables the command.
    pub operator_id: Option<i64>,
    /// Path of the WARN-level log file served by `/debug`.
    pub warning_log: Option<PathBuf>,
    /// Token ceiling for a single user message.
    pub request_max_tokens: usize,
    /// Upper bound on one completion call.
    pub completion_timeout: Duration,
    /// Text that opens every system prompt.
    pub preamble: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            operator_id: None,
            warning_log: None,
            request_max_tokens: DEFAULT_REQUEST_MAX_TOKENS,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            preamble: DEFAULT_PREAMBLE.to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }
}

/// Builder for ControllerConfig.
#[derive(Debug, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    pub fn operator_id(mut self, id: i64) -> Self {
        self.config.operator_id = Some(id);
        self
    }

    pub fn warning_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.warning_log = Some(path.into());
        self
    }

    pub fn request_max_tokens(mut self, tokens: usize) -> Self {
        self.config.request_max_tokens = tokens;
        self
    }

    pub fn completion_timeout(mut self, timeout: Duration) -> Self {
        self.config.completion_timeout = timeout;
        self
    }

    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.config.preamble = preamble.into();
        self
    }

    pub fn build(self) -> ControllerConfig {
        self.config
    }
}
