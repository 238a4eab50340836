//! Multi-table steps that must commit together.
//!
//! A selection writes the profile and advances the conversation state; ending
//! a session wipes the history and resets the state. Each runs in one
//! transaction so a failure leaves both tables as they were.

use brain_core::{ChatState, ConversationKey};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Profile, ProfileFields};
use crate::{history, profile, state};

/// Create or update the profile for `key.user_id`, then move the
/// conversation to `next`.
pub async fn record_selection(
    pool: &SqlitePool,
    key: ConversationKey,
    fields: ProfileFields,
    next: ChatState,
) -> Result<Profile> {
    let mut tx = pool.begin().await?;

    let stored = match profile::get_profile(&mut *tx, key.user_id).await? {
        Some(existing) => profile::update_profile(&mut *tx, &existing, fields).await?,
        None => profile::create_profile(&mut *tx, key.user_id, fields).await?,
    };
    state::upsert_state(&mut *tx, key, next).await?;

    tx.commit().await?;

    Ok(stored)
}

/// Delete all history for `key.user_id` and put the conversation back in
/// [`ChatState::NotChat`]. Returns the number of records removed.
pub async fn end_session(pool: &SqlitePool, key: ConversationKey) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let deleted = history::delete_all(&mut *tx, key.user_id).await?;
    state::upsert_state(&mut *tx, key, ChatState::NotChat).await?;

    tx.commit().await?;

    Ok(deleted)
}
