//! Conversation state persistence.

use brain_core::{ChatState, ConversationKey};
use sqlx::SqliteExecutor;

use crate::Result;

/// Get the recorded state for a conversation, if any.
pub async fn get_state<'e, E>(executor: E, key: ConversationKey) -> Result<Option<ChatState>>
where
    E: SqliteExecutor<'e>,
{
    let name = sqlx::query_scalar::<_, String>(
        r#"
        SELECT state
        FROM conversation_states
        WHERE telegram_id = ? AND chat_id = ?
        "#,
    )
    .bind(key.user_id)
    .bind(key.chat_id)
    .fetch_optional(executor)
    .await?;

    match name {
        Some(name) => Ok(Some(name.parse::<ChatState>()?)),
        None => Ok(None),
    }
}

/// Record the state for a conversation, replacing any previous one.
pub async fn upsert_state<'e, E>(
    executor: E,
    key: ConversationKey,
    state: ChatState,
) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO conversation_states (telegram_id, chat_id, state)
        VALUES (?, ?, ?)
        ON CONFLICT(telegram_id, chat_id) DO UPDATE SET
            state = excluded.state,
            updated_at = datetime('now')
        "#,
    )
    .bind(key.user_id)
    .bind(key.chat_id)
    .bind(state.as_str())
    .execute(executor)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DatabaseError};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_unknown_key_has_no_state() {
        let db = test_db().await;
        let state = get_state(db.pool(), ConversationKey::new(1, 1))
            .await
            .unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_state() {
        let db = test_db().await;
        let key = ConversationKey::new(1, 10);

        upsert_state(db.pool(), key, ChatState::SetSubject)
            .await
            .unwrap();
        upsert_state(db.pool(), key, ChatState::Chat)
            .await
            .unwrap();

        assert_eq!(
            get_state(db.pool(), key).await.unwrap(),
            Some(ChatState::Chat)
        );
    }

    #[tokio::test]
    async fn test_states_are_per_chat() {
        let db = test_db().await;
        upsert_state(db.pool(), ConversationKey::new(1, 10), ChatState::Chat)
            .await
            .unwrap();

        let other_chat = get_state(db.pool(), ConversationKey::new(1, 20))
            .await
            .unwrap();
        assert!(other_chat.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_state_is_reported() {
        let db = test_db().await;
        sqlx::query(
            "INSERT INTO conversation_states (telegram_id, chat_id, state) VALUES (9, 9, 'bogus')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = get_state(db.pool(), ConversationKey::new(9, 9)).await;
        assert!(matches!(result, Err(DatabaseError::Corrupt(_))));
    }
}
