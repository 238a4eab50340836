//! Fixed user-facing texts.

use rand::seq::SliceRandom;
use rand::Rng;

pub const HELP_TEXT: &str = "Привет, я - бот-GPT, вот мой функционал:\n\
/help или /start - список всех команд (ты уже тут)\n\
/new_chat - создание нового чата с GPT\n\
/end_chat - удаление чата, очистка истории сообщений";

pub const CHOOSE_SUBJECT: &str = "Выбери предмет";

pub const CHOOSE_DIFFICULTY: &str = "Выбери сложность объяснения";

pub const INVALID_CHOICE: &str =
    "Это не является корректным значением, пожалуйста, выберите ещё раз";

pub const ASK_QUESTION: &str = "Задайте свой вопрос GPT:";

pub const MESSAGE_TOO_LONG: &str = "Сообщение слишком длинное, пожалуйста, укоротите его";

pub const HISTORY_DELETED: &str = "История чата удалена, спасибо за использование бота! \
Вы можете начать новый чат: /new_chat";

pub const APOLOGY: &str =
    "Произошла ошибка, пожалуйста, повторите попытку или обратитесь в поддержку";

pub const LOG_EMPTY: &str = "Файл с логами ошибок пуст!";

/// Openers for the reply to unrecognized input.
pub const ACKNOWLEDGMENTS: [&str; 6] = [
    "О, круто!",
    "Верно подмечено!",
    "Как с языка снял",
    "Какой ты всё-таки умный",
    "По-любому что-то умное написал",
    "Как лаконично-то!",
];

/// Appended after every acknowledgment.
pub const UNRECOGNIZED_HINT: &str = "\n\nЕсли ты хотел, чтобы я что-то сделал, то я не \
распознал твою команду, пожалуйста, сверься с /help";

/// A random acknowledgment followed by the `/help` hint.
pub fn acknowledgment<R: Rng + ?Sized>(rng: &mut R) -> String {
    let opener = ACKNOWLEDGMENTS
        .choose(rng)
        .copied()
        .unwrap_or(ACKNOWLEDGMENTS[0]);
    format!("{}{}", opener, UNRECOGNIZED_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_acknowledgment_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let text = acknowledgment(&mut rng);
            let opener = text.strip_suffix(UNRECOGNIZED_HINT).unwrap();
            assert!(ACKNOWLEDGMENTS.contains(&opener));
        }
    }

    #[test]
    fn test_help_lists_commands() {
        for command in ["/help", "/start", "/new_chat", "/end_chat"] {
            assert!(HELP_TEXT.contains(command));
        }
        assert!(!HELP_TEXT.contains("/debug"));
    }
}
