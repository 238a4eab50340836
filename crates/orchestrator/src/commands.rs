//! Slash command recognition.

/// A recognized control command, or plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/help` or `/start`.
    Help,
    /// `/new_chat`.
    NewChat,
    /// `/end_chat`.
    EndChat,
    /// `/debug`, operator only.
    Debug,
    /// Anything else.
    Text,
}

impl Command {
    /// Classify inbound text.
    ///
    /// The command is the first whitespace-separated word, with an optional
    /// `@botname` suffix removed, so `/help@tutor_bot now` is still `/help`.
    pub fn parse(text: &str) -> Self {
        let Some(word) = text.split_whitespace().next() else {
            return Command::Text;
        };
        let Some(name) = word.strip_prefix('/') else {
            return Command::Text;
        };
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "help" | "start" => Command::Help,
            "new_chat" => Command::NewChat,
            "end_chat" => Command::EndChat,
            "debug" => Command::Debug,
            _ => Command::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/start"), Command::Help);
        assert_eq!(Command::parse("/new_chat"), Command::NewChat);
        assert_eq!(Command::parse("/end_chat"), Command::EndChat);
        assert_eq!(Command::parse("/debug"), Command::Debug);
    }

    #[test]
    fn test_parse_with_suffix_and_arguments() {
        assert_eq!(Command::parse("/help@tutor_bot"), Command::Help);
        assert_eq!(Command::parse("  /end_chat please"), Command::EndChat);
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(Command::parse(""), Command::Text);
        assert_eq!(Command::parse("help"), Command::Text);
        assert_eq!(Command::parse("what is /help"), Command::Text);
        assert_eq!(Command::parse("/unknown"), Command::Text);
        assert_eq!(Command::parse("/HELP"), Command::Text);
    }
}
