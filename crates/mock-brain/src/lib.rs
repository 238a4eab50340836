//! Completion client doubles for tests.
//!
//! This crate provides `CompletionClient` implementations that never touch
//! the network:
//! - `EchoBrain` - Replies with the last user message
//! - `ScriptedBrain` - Plays back queued outcomes and records every prompt
//! - `FailingBrain` - Always fails with a fixed reason
//! - `DelayedBrain` - Wraps another client with artificial delay
//!
//! For a real model server, use the `local-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{CompletionClient, CompletionOutcome, EchoBrain, PromptAssembler};
//!
//! #[tokio::main]
//! async fn main() {
//!     let brain = EchoBrain::new();
//!     let prompt = PromptAssembler::default().assemble("", "", &[], "Hello!");
//!
//!     let outcome = brain.ask(&prompt).await;
//!     assert_eq!(outcome, CompletionOutcome::Success("Hello!".to_string()));
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod scripted;

pub use brain_core::{
    async_trait, CompletionClient, CompletionOutcome, FailureReason, Prompt, PromptAssembler,
};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use scripted::ScriptedBrain;
