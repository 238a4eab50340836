//! Completion client for a local OpenAI-compatible chat endpoint.
//!
//! The default target is an LM Studio style server on
//! `http://localhost:1234/v1/chat/completions`.
//!
//! # Features
//!
//! - One POST per question, no retries
//! - Client-side timeout, reported as a network failure
//! - Non-200 answers reported with their status code
//! - Configurable via environment variables or a builder
//!
//! # Usage
//!
//! ```rust,no_run
//! use local_brain::{LocalBrain, LocalBrainConfig};
//! use brain_core::{CompletionClient, PromptAssembler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = LocalBrain::new(LocalBrainConfig::from_env()?)?;
//!     let prompt = PromptAssembler::default().assemble("", "", &[], "Hello!");
//!     println!("{:?}", brain.ask(&prompt).await);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse};
pub use brain::LocalBrain;
pub use config::{LocalBrainConfig, LocalBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, CompletionClient, CompletionOutcome, FailureReason, Prompt};
