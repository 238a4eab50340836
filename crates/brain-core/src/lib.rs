//! Core contracts and types for the tutor bot.
//!
//! This crate provides the shared vocabulary used by the persistence layer,
//! the completion clients and the conversation controller:
//!
//! - [`CompletionClient`] - The trait every completion backend implements
//! - [`CompletionOutcome`] / [`FailureReason`] - Tagged result of one remote call
//! - [`Prompt`] / [`PromptAssembler`] - Outbound message sequence construction
//! - [`BudgetGuard`] - Pre-flight token ceiling for user messages
//! - [`ChatState`] / [`ConversationKey`] - Dialogue position per (user, chat)
//! - [`Role`] / [`ChatMessage`] / [`HistoryMessage`] - Message types
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, CompletionClient, CompletionOutcome, Prompt};
//!
//! struct ParrotBrain;
//!
//! #[async_trait]
//! impl CompletionClient for ParrotBrain {
//!     async fn ask(&self, prompt: &Prompt) -> CompletionOutcome {
//!         CompletionOutcome::Success(prompt.message.clone())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "ParrotBrain"
//!     }
//! }
//! ```

mod budget;
mod error;
mod message;
mod outcome;
mod prompt;
mod state;
mod trait_def;

pub use budget::{BudgetGuard, BudgetVerdict, DEFAULT_REQUEST_MAX_TOKENS};
pub use error::BrainError;
pub use message::{ChatMessage, HistoryMessage, Role};
pub use outcome::{CompletionOutcome, FailureReason};
pub use prompt::{hash_prompt, Prompt, PromptAssembler, DEFAULT_PREAMBLE};
pub use state::{ChatState, ConversationKey};
pub use trait_def::CompletionClient;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
