//! Dialogue position per (user, chat).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BrainError;

/// Identifies one conversation: the user and the chat it happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub user_id: i64,
    pub chat_id: i64,
}

impl ConversationKey {
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user_id, self.chat_id)
    }
}

/// Where a conversation currently is.
///
/// A key with no recorded state is in [`ChatState::NotChat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// Idle.
    #[default]
    NotChat,
    /// Waiting for a subject label.
    SetSubject,
    /// Waiting for a difficulty label.
    SetDifficult,
    /// Forwarding messages to the model.
    Chat,
}

impl ChatState {
    /// Persisted name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            ChatState::NotChat => "not_chat",
            ChatState::SetSubject => "set_subject",
            ChatState::SetDifficult => "set_difficult",
            ChatState::Chat => "chat",
        }
    }

    /// Whether the conversation is somewhere other than idle.
    pub fn is_active(self) -> bool {
        self != ChatState::NotChat
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatState {
    type Err = BrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_chat" => Ok(ChatState::NotChat),
            "set_subject" => Ok(ChatState::SetSubject),
            "set_difficult" => Ok(ChatState::SetDifficult),
            "chat" => Ok(ChatState::Chat),
            other => Err(BrainError::UnknownState(other.to_string())),
        }
    }
}
