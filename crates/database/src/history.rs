//! Conversation history persistence.
//!
//! History is append-only: records are only ever inserted one at a time and
//! removed all at once per user. Every read is ordered by row ID.

use brain_core::Role;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::{DatabaseError, Result};
use crate::models::HistoryRecord;

/// Append one record for the profile owning `telegram_id`.
///
/// Fails with [`DatabaseError::NotFound`] when no profile exists; records are
/// never written without an owner.
pub async fn append_record<'e, E>(
    executor: E,
    telegram_id: i64,
    message: &str,
    role: Role,
) -> Result<HistoryRecord>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, HistoryRecord>(
        r#"
        INSERT INTO history_records (user_id, message, role)
        SELECT id, ?, ?
        FROM users
        WHERE telegram_id = ?
        RETURNING id, user_id, message, role
        "#,
    )
    .bind(message)
    .bind(role.code())
    .bind(telegram_id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| DatabaseError::user_not_found(telegram_id))
}

/// Append a user message and the assistant reply as a single transaction.
///
/// Either both records are committed or neither is.
pub async fn append_turn(
    pool: &SqlitePool,
    telegram_id: i64,
    user_message: &str,
    reply: &str,
) -> Result<(HistoryRecord, HistoryRecord)> {
    let mut tx = pool.begin().await?;

    let user_record = append_record(&mut *tx, telegram_id, user_message, Role::User).await?;
    let reply_record = append_record(&mut *tx, telegram_id, reply, Role::Assistant).await?;

    tx.commit().await?;

    Ok((user_record, reply_record))
}

/// All records for a user in creation order.
pub async fn list_ordered<'e, E>(executor: E, telegram_id: i64) -> Result<Vec<HistoryRecord>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, HistoryRecord>(
        r#"
        SELECT h.id, h.user_id, h.message, h.role
        FROM history_records h
        JOIN users u ON u.id = h.user_id
        WHERE u.telegram_id = ?
        ORDER BY h.id ASC
        "#,
    )
    .bind(telegram_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Delete every record for a user. Returns the number removed.
pub async fn delete_all<'e, E>(executor: E, telegram_id: i64) -> Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM history_records
        WHERE user_id IN (
            SELECT id FROM users WHERE telegram_id = ?
        )
        "#,
    )
    .bind(telegram_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
