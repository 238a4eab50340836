//! Application state shared across handlers.

use std::sync::Arc;

use orchestrator::DynController;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The conversation state machine.
    pub controller: Arc<DynController>,
    /// Token the front-end must present.
    pub bot_token: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(controller: Arc<DynController>, bot_token: impl Into<Arc<str>>) -> Self {
        Self {
            controller,
            bot_token: bot_token.into(),
        }
    }
}
