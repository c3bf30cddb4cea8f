//! Conversation entry types.
//!
//! An entry is one line of a run's conversation: the user's prompt or one
//! labeled assistant output. Entries are immutable once written and ordered
//! by `created_at` ascending within a `(owner_uid, run_id)` partition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of an entry in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    /// Entry submitted by the user.
    User,
    /// Entry produced by the generation backend.
    Assistant,
}

/// A single persisted line in a run's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned document identifier.
    pub id: String,
    /// The uid of the identity that created this entry.
    pub owner_uid: String,
    /// The run this entry belongs to.
    pub run_id: String,
    /// Who produced the entry.
    pub role: EntryRole,
    /// Display label for assistant outputs ("Product plan", etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The entry text.
    pub content: String,
    /// Store-assigned creation timestamp; the ordering key within a run.
    pub created_at: DateTime<Utc>,
}

/// An entry before persistence; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub owner_uid: String,
    pub run_id: String,
    pub role: EntryRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub content: String,
}

impl NewEntry {
    /// Creates a user entry carrying the submitted prompt.
    pub fn user(
        owner_uid: impl Into<String>,
        run_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            owner_uid: owner_uid.into(),
            run_id: run_id.into(),
            role: EntryRole::User,
            label: None,
            content: content.into(),
        }
    }

    /// Creates a labeled assistant entry for one generated section.
    pub fn assistant(
        owner_uid: impl Into<String>,
        run_id: impl Into<String>,
        label: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            owner_uid: owner_uid.into(),
            run_id: run_id.into(),
            role: EntryRole::Assistant,
            label: Some(label.into()),
            content: content.into(),
        }
    }
}
