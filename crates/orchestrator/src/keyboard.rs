//! What the transport should show next to a reply.

use brain_core::ChatState;
use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, Subject};

/// Which fixed option set accompanies a reply.
///
/// Always derived from the state the conversation ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardHint {
    Idle,
    InChat,
    Subject,
    Difficulty,
}

impl KeyboardHint {
    pub fn for_state(state: ChatState) -> Self {
        match state {
            ChatState::NotChat => KeyboardHint::Idle,
            ChatState::SetSubject => KeyboardHint::Subject,
            ChatState::SetDifficult => KeyboardHint::Difficulty,
            ChatState::Chat => KeyboardHint::InChat,
        }
    }

    /// Button captions, `/help` first.
    pub fn buttons(self) -> Vec<&'static str> {
        let mut buttons = vec!["/help"];
        match self {
            KeyboardHint::Idle => buttons.push("/new_chat"),
            KeyboardHint::InChat => buttons.push("/end_chat"),
            KeyboardHint::Subject => buttons.extend(Subject::labels()),
            KeyboardHint::Difficulty => buttons.extend(Difficulty::labels()),
        }
        buttons
    }
}

/// A file sent along with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The controller's answer to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: KeyboardHint,
    pub attachment: Option<Attachment>,
}

impl Reply {
    /// A text reply for a conversation now in `state`.
    pub fn new(text: impl Into<String>, state: ChatState) -> Self {
        Self {
            text: text.into(),
            keyboard: KeyboardHint::for_state(state),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_per_state() {
        assert_eq!(
            KeyboardHint::for_state(ChatState::NotChat),
            KeyboardHint::Idle
        );
        assert_eq!(
            KeyboardHint::for_state(ChatState::SetSubject),
            KeyboardHint::Subject
        );
        assert_eq!(
            KeyboardHint::for_state(ChatState::SetDifficult),
            KeyboardHint::Difficulty
        );
        assert_eq!(
            KeyboardHint::for_state(ChatState::Chat),
            KeyboardHint::InChat
        );
    }

    #[test]
    fn test_buttons() {
        assert_eq!(KeyboardHint::Idle.buttons(), vec!["/help", "/new_chat"]);
        assert_eq!(KeyboardHint::InChat.buttons(), vec!["/help", "/end_chat"]);
        assert_eq!(
            KeyboardHint::Subject.buttons(),
            vec!["/help", "математика", "английский", "химия"]
        );
        assert_eq!(
            KeyboardHint::Difficulty.buttons(),
            vec!["/help", "простая", "хард"]
        );
    }

    #[test]
    fn test_hint_serializes_snake_case() {
        let json = serde_json::to_string(&KeyboardHint::InChat).unwrap();
        assert_eq!(json, "\"in_chat\"");
    }
}
