//! HTTP gateway for the tutor bot.
//!
//! The chat front-end posts each user message to `POST /v1/messages` and
//! renders the reply text and keyboard it gets back.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{log_dir_from_env, ConfigError, GatewayConfig, WARNING_LOG_FILE};
pub use error::GatewayError;
pub use logging::init_logging;
pub use routes::messages::{AttachmentBody, InboundMessage, ReplyBody};
pub use routes::router;
pub use state::AppState;
