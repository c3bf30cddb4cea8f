//! Run domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered conversation thread.
///
/// A run is created by the generation orchestrator on the first successful
/// generation against its identifier, and is never mutated or deleted by
/// this core. Every run carries the `owner_uid` of its creator; queries are
/// filtered on that uid store-side, so cross-identity reads are impossible
/// by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Stable run identifier (UUID format, client-synthesized).
    pub id: String,
    /// The uid of the identity that created this run.
    pub owner_uid: String,
    /// The prompt the run was created from.
    pub prompt: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A run summary before persistence; the store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRun {
    pub id: String,
    pub owner_uid: String,
    pub prompt: String,
}

impl NewRun {
    /// Creates a run summary for the given owner and prompt.
    pub fn new(
        id: impl Into<String>,
        owner_uid: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_uid: owner_uid.into(),
            prompt: prompt.into(),
        }
    }
}
