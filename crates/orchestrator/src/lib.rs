//! Conversation state machine for the tutor bot.
//!
//! This crate provides the [`ConversationController`], which walks each
//! (user, chat) pair through subject selection, difficulty selection and an
//! open chat with the completion endpoint.
//!
//! # Architecture
//!
//! ```text
//! inbound text (from the gateway)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CONVERSATION CONTROLLER                     │
//! │                                                             │
//! │  1. Acquire the per-user lock                               │
//! │         ↓                                                   │
//! │  2. Load state from the StateStore (absent = not_chat)      │
//! │         ↓                                                   │
//! │  3. Dispatch on (state, command):                           │
//! │     • not_chat      → /new_chat, /debug, acknowledgment     │
//! │     • set_subject   → profile.subject, next state           │
//! │     • set_difficult → profile.difficult, next state         │
//! │     • chat          → budget → history → prompt → model     │
//! │                        → store both turns or neither        │
//! │         ↓                                                   │
//! │  4. Reply text + keyboard hint for the resulting state      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use database::MemoryStore;
//! use mock_brain::EchoBrain;
//! use orchestrator::{ControllerConfig, ConversationController, KeyboardHint};
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = ConversationController::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(EchoBrain::new()),
//!         ControllerConfig::default(),
//!     )
//!     .expect("tokenizer loads");
//!
//!     let reply = controller.handle(1, 1, "/new_chat").await;
//!     assert_eq!(reply.keyboard, KeyboardHint::Subject);
//! }
//! ```

mod catalog;
mod commands;
mod config;
mod controller;
mod diagnostics;
mod error;
mod keyboard;
mod locks;
pub mod replies;

// Public exports
pub use catalog::{Difficulty, Subject};
pub use commands::Command;
pub use config::{ControllerConfig, ControllerConfigBuilder, DEFAULT_COMPLETION_TIMEOUT};
pub use controller::ConversationController;
pub use diagnostics::{WarningLog, DEFAULT_DUMP_LIMIT, LOG_ATTACHMENT_NAME};
pub use error::OrchestratorError;
pub use keyboard::{Attachment, KeyboardHint, Reply};
pub use locks::UserLocks;

// Re-export commonly used types from dependencies
pub use brain_core::{ChatState, CompletionClient, ConversationKey};
pub use database::ConversationStore;

/// Controller over type-erased backends, as the gateway holds it.
pub type DynController = ConversationController<dyn ConversationStore, dyn CompletionClient>;
