//! Database models.

use brain_core::{HistoryMessage, Role};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Result;

/// A user profile, identified by the transport's stable user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Auto-incrementing row ID (history foreign key).
    pub id: i64,
    /// External identity.
    pub telegram_id: i64,
    /// Chosen subject code, once set.
    pub subject: Option<i64>,
    /// Chosen difficulty code, once set.
    pub difficult: Option<i64>,
}

impl Profile {
    /// Subject and difficulty codes, once both have been chosen.
    pub fn selections(&self) -> Option<(i64, i64)> {
        Some((self.subject?, self.difficult?))
    }
}

/// Fields to write on create or update. `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub subject: Option<i64>,
    pub difficult: Option<i64>,
}

impl ProfileFields {
    pub fn subject(code: i64) -> Self {
        Self {
            subject: Some(code),
            ..Default::default()
        }
    }

    pub fn difficult(code: i64) -> Self {
        Self {
            difficult: Some(code),
            ..Default::default()
        }
    }
}

/// One stored conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HistoryRecord {
    /// Auto-incrementing ID; the conversation order.
    pub id: i64,
    /// Owning profile row.
    pub user_id: i64,
    /// Message text.
    pub message: String,
    /// Role code (see [`Role::code`]).
    pub role: i64,
}

impl HistoryRecord {
    /// Decoded role.
    pub fn role(&self) -> Result<Role> {
        Ok(Role::from_code(self.role)?)
    }

    /// Convert into the prompt-facing message type.
    pub fn to_history_message(&self) -> Result<HistoryMessage> {
        Ok(HistoryMessage {
            role: self.role()?,
            content: self.message.clone(),
        })
    }
}
