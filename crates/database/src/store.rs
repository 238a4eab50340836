//! Repository traits and their two backends.
//!
//! The conversation controller only talks to these traits. [`Database`] is
//! the durable backend; [`MemoryStore`] keeps everything in process memory
//! and is meant for tests and throwaway runs.

use std::collections::HashMap;

use async_trait::async_trait;
use brain_core::{ChatState, ConversationKey, Role};
use tokio::sync::Mutex;

use crate::error::{DatabaseError, Result};
use crate::models::{HistoryRecord, Profile, ProfileFields};
use crate::{history, profile, session, state, Database};

/// One profile per external identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a profile.
    async fn get_profile(&self, telegram_id: i64) -> Result<Option<Profile>>;

    /// Create a profile. Fails if one already exists for the identity.
    async fn create_profile(&self, telegram_id: i64, fields: ProfileFields) -> Result<Profile>;

    /// Update the fields set in `fields`, returning the stored profile.
    async fn update_profile(&self, profile: &Profile, fields: ProfileFields) -> Result<Profile>;
}

/// Append-only per-user message history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a single record. Rejected when the identity has no profile.
    async fn append(&self, telegram_id: i64, message: &str, role: Role) -> Result<HistoryRecord>;

    /// Append a user message and its reply atomically.
    async fn append_turn(&self, telegram_id: i64, user_message: &str, reply: &str) -> Result<()>;

    /// All records in creation order.
    async fn get_ordered(&self, telegram_id: i64) -> Result<Vec<HistoryRecord>>;

    /// Remove every record for the identity. Idempotent.
    async fn delete_all(&self, telegram_id: i64) -> Result<u64>;
}

/// Dialogue position per (user, chat).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current state; [`ChatState::NotChat`] when none was recorded.
    async fn get_state(&self, key: ConversationKey) -> Result<ChatState>;

    async fn set_state(&self, key: ConversationKey, state: ChatState) -> Result<()>;
}

/// Steps spanning several tables. Each either fully applies or leaves
/// storage untouched.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create or update the profile with `fields` and move to `next`.
    async fn record_selection(
        &self,
        key: ConversationKey,
        fields: ProfileFields,
        next: ChatState,
    ) -> Result<Profile>;

    /// Wipe the history for `key.user_id` and return to
    /// [`ChatState::NotChat`]. Returns the number of records removed.
    async fn end_session(&self, key: ConversationKey) -> Result<u64>;
}

/// Everything the conversation controller needs from storage.
pub trait ConversationStore: ProfileStore + HistoryStore + StateStore + SessionStore {}

impl<T: ProfileStore + HistoryStore + StateStore + SessionStore> ConversationStore for T {}

#[async_trait]
impl ProfileStore for Database {
    async fn get_profile(&self, telegram_id: i64) -> Result<Option<Profile>> {
        profile::get_profile(self.pool(), telegram_id).await
    }

    async fn create_profile(&self, telegram_id: i64, fields: ProfileFields) -> Result<Profile> {
        profile::create_profile(self.pool(), telegram_id, fields).await
    }

    async fn update_profile(&self, profile: &Profile, fields: ProfileFields) -> Result<Profile> {
        profile::update_profile(self.pool(), profile, fields).await
    }
}

#[async_trait]
impl HistoryStore for Database {
    async fn append(&self, telegram_id: i64, message: &str, role: Role) -> Result<HistoryRecord> {
        history::append_record(self.pool(), telegram_id, message, role).await
    }

    async fn append_turn(&self, telegram_id: i64, user_message: &str, reply: &str) -> Result<()> {
        history::append_turn(self.pool(), telegram_id, user_message, reply).await?;
        Ok(())
    }

    async fn get_ordered(&self, telegram_id: i64) -> Result<Vec<HistoryRecord>> {
        history::list_ordered(self.pool(), telegram_id).await
    }

    async fn delete_all(&self, telegram_id: i64) -> Result<u64> {
        history::delete_all(self.pool(), telegram_id).await
    }
}

#[async_trait]
impl StateStore for Database {
    async fn get_state(&self, key: ConversationKey) -> Result<ChatState> {
        let stored = state::get_state(self.pool(), key).await?;
        Ok(stored.unwrap_or_default())
    }

    async fn set_state(&self, key: ConversationKey, state: ChatState) -> Result<()> {
        state::upsert_state(self.pool(), key, state).await
    }
}

#[async_trait]
impl SessionStore for Database {
    async fn record_selection(
        &self,
        key: ConversationKey,
        fields: ProfileFields,
        next: ChatState,
    ) -> Result<Profile> {
        session::record_selection(self.pool(), key, fields, next).await
    }

    async fn end_session(&self, key: ConversationKey) -> Result<u64> {
        session::end_session(self.pool(), key).await
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    profiles: HashMap<i64, Profile>,
    next_profile_id: i64,
    records: Vec<HistoryRecord>,
    next_record_id: i64,
    states: HashMap<ConversationKey, ChatState>,
    reject_history_writes: bool,
    reject_state_writes: bool,
}

impl MemoryInner {
    fn push_record(&mut self, user_id: i64, message: &str, role: Role) -> HistoryRecord {
        self.next_record_id += 1;
        let record = HistoryRecord {
            id: self.next_record_id,
            user_id,
            message: message.to_string(),
            role: role.code(),
        };
        self.records.push(record.clone());
        record
    }

    fn check_state_writable(&self) -> Result<()> {
        if self.reject_state_writes {
            return Err(DatabaseError::WriteRejected(
                "state writes disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn owner_id(&self, telegram_id: i64) -> Result<i64> {
        if self.reject_history_writes {
            return Err(DatabaseError::WriteRejected(
                "history writes disabled".to_string(),
            ));
        }
        self.profiles
            .get(&telegram_id)
            .map(|p| p.id)
            .ok_or_else(|| DatabaseError::user_not_found(telegram_id))
    }
}

/// Volatile backend holding every table behind one lock.
///
/// Same contract as the SQLite backend, including rejection of history
/// writes for identities without a profile.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent history write fail, to exercise error paths.
    pub async fn reject_history_writes(&self, reject: bool) {
        self.inner.lock().await.reject_history_writes = reject;
    }

    /// Make every subsequent state write fail, including the state half of
    /// [`SessionStore`] steps.
    pub async fn reject_state_writes(&self, reject: bool) {
        self.inner.lock().await.reject_state_writes = reject;
    }

    /// Total records across all users.
    pub async fn record_count(&self) -> usize {
        self.inner.lock().await.records.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, telegram_id: i64) -> Result<Option<Profile>> {
        Ok(self.inner.lock().await.profiles.get(&telegram_id).cloned())
    }

    async fn create_profile(&self, telegram_id: i64, fields: ProfileFields) -> Result<Profile> {
        let mut inner = self.inner.lock().await;
        if inner.profiles.contains_key(&telegram_id) {
            return Err(DatabaseError::AlreadyExists {
                entity: "User",
                id: telegram_id.to_string(),
            });
        }

        inner.next_profile_id += 1;
        let profile = Profile {
            id: inner.next_profile_id,
            telegram_id,
            subject: fields.subject,
            difficult: fields.difficult,
        };
        inner.profiles.insert(telegram_id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, profile: &Profile, fields: ProfileFields) -> Result<Profile> {
        let mut inner = self.inner.lock().await;
        let stored = inner
            .profiles
            .get_mut(&profile.telegram_id)
            .filter(|stored| stored.id == profile.id)
            .ok_or_else(|| DatabaseError::user_not_found(profile.telegram_id))?;

        if let Some(subject) = fields.subject {
            stored.subject = Some(subject);
        }
        if let Some(difficult) = fields.difficult {
            stored.difficult = Some(difficult);
        }
        Ok(stored.clone())
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, telegram_id: i64, message: &str, role: Role) -> Result<HistoryRecord> {
        let mut inner = self.inner.lock().await;
        let user_id = inner.owner_id(telegram_id)?;
        Ok(inner.push_record(user_id, message, role))
    }

    async fn append_turn(&self, telegram_id: i64, user_message: &str, reply: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let user_id = inner.owner_id(telegram_id)?;
        inner.push_record(user_id, user_message, Role::User);
        inner.push_record(user_id, reply, Role::Assistant);
        Ok(())
    }

    async fn get_ordered(&self, telegram_id: i64) -> Result<Vec<HistoryRecord>> {
        let inner = self.inner.lock().await;
        let Some(user_id) = inner.profiles.get(&telegram_id).map(|p| p.id) else {
            return Ok(Vec::new());
        };
        Ok(inner
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_all(&self, telegram_id: i64) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let Some(user_id) = inner.profiles.get(&telegram_id).map(|p| p.id) else {
            return Ok(0);
        };
        let before = inner.records.len();
        inner.records.retain(|r| r.user_id != user_id);
        Ok((before - inner.records.len()) as u64)
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get_state(&self, key: ConversationKey) -> Result<ChatState> {
        Ok(self
            .inner
            .lock()
            .await
            .states
            .get(&key)
            .copied()
            .unwrap_or_default())
    }

    async fn set_state(&self, key: ConversationKey, state: ChatState) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.check_state_writable()?;
        inner.states.insert(key, state);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn record_selection(
        &self,
        key: ConversationKey,
        fields: ProfileFields,
        next: ChatState,
    ) -> Result<Profile> {
        let mut inner = self.inner.lock().await;
        inner.check_state_writable()?;

        let stored = match inner.profiles.get_mut(&key.user_id) {
            Some(stored) => {
                if let Some(subject) = fields.subject {
                    stored.subject = Some(subject);
                }
                if let Some(difficult) = fields.difficult {
                    stored.difficult = Some(difficult);
                }
                stored.clone()
            }
            None => {
                inner.next_profile_id += 1;
                let profile = Profile {
                    id: inner.next_profile_id,
                    telegram_id: key.user_id,
                    subject: fields.subject,
                    difficult: fields.difficult,
                };
                inner.profiles.insert(key.user_id, profile.clone());
                profile
            }
        };
        inner.states.insert(key, next);
        Ok(stored)
    }

    async fn end_session(&self, key: ConversationKey) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        inner.check_state_writable()?;

        let deleted = match inner.profiles.get(&key.user_id).map(|p| p.id) {
            Some(user_id) => {
                let before = inner.records.len();
                inner.records.retain(|r| r.user_id != user_id);
                (before - inner.records.len()) as u64
            }
            None => 0,
        };
        inner.states.insert(key, ChatState::NotChat);
        Ok(deleted)
    }
}
