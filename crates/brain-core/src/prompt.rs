//! Prompt assembly and fingerprinting.

use sha2::{Digest, Sha256};

use crate::message::{ChatMessage, HistoryMessage, Role};

/// Static preamble that opens every system prompt.
pub const DEFAULT_PREAMBLE: &str =
    "You MUST answer polite and friendly, you are a helping person. ";

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Everything a completion backend needs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Preamble + subject instructions + difficulty instructions.
    pub system: String,
    /// Prior turns, oldest first.
    pub history: Vec<ChatMessage>,
    /// The new user message.
    pub message: String,
}

impl Prompt {
    /// The full outbound sequence: system, history, then the new user message.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(self.system.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(self.message.clone()));
        messages
    }
}

/// Builds outbound prompts from stored history and the user's choices.
///
/// Pure read-and-transform; it never mutates anything it is given.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    preamble: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}

impl PromptAssembler {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// System prompt: preamble, then subject text, then difficulty text.
    pub fn system_prompt(&self, subject_text: &str, difficulty_text: &str) -> String {
        let mut system = String::with_capacity(
            self.preamble.len() + subject_text.len() + difficulty_text.len(),
        );
        system.push_str(&self.preamble);
        system.push_str(subject_text);
        system.push_str(difficulty_text);
        system
    }

    /// Assemble the prompt for `message`.
    ///
    /// Stored system records are dropped: the only system entry is the
    /// freshly built one at the head of the sequence.
    pub fn assemble(
        &self,
        subject_text: &str,
        difficulty_text: &str,
        history: &[HistoryMessage],
        message: &str,
    ) -> Prompt {
        let history = history
            .iter()
            .filter(|entry| entry.role != Role::System)
            .map(|entry| ChatMessage::new(entry.role, entry.content.clone()))
            .collect();

        Prompt {
            system: self.system_prompt(subject_text, difficulty_text),
            history,
            message: message.to_string(),
        }
    }
}
