//! Profile CRUD operations.

use sqlx::SqliteExecutor;

use crate::error::{DatabaseError, Result};
use crate::models::{Profile, ProfileFields};

/// Get a profile by external identity.
pub async fn get_profile<'e, E>(executor: E, telegram_id: i64) -> Result<Option<Profile>>
where
    E: SqliteExecutor<'e>,
{
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, telegram_id, subject, difficult
        FROM users
        WHERE telegram_id = ?
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(executor)
    .await?;

    Ok(profile)
}

/// Create a profile for an identity that has none yet.
pub async fn create_profile<'e, E>(
    executor: E,
    telegram_id: i64,
    fields: ProfileFields,
) -> Result<Profile>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO users (telegram_id, subject, difficult)
        VALUES (?, ?, ?)
        RETURNING id, telegram_id, subject, difficult
        "#,
    )
    .bind(telegram_id)
    .bind(fields.subject)
    .bind(fields.difficult)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: telegram_id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })
}

/// Update the given fields of an existing profile in place.
///
/// Fields left as `None` keep their stored value.
pub async fn update_profile<'e, E>(
    executor: E,
    profile: &Profile,
    fields: ProfileFields,
) -> Result<Profile>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Profile>(
        r#"
        UPDATE users
        SET subject = COALESCE(?, subject),
            difficult = COALESCE(?, difficult)
        WHERE id = ?
        RETURNING id, telegram_id, subject, difficult
        "#,
    )
    .bind(fields.subject)
    .bind(fields.difficult)
    .bind(profile.id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| DatabaseError::user_not_found(profile.telegram_id))
}
