//! Document store capability traits.
//!
//! The remote store is treated as an external capability: durable immutable
//! documents, owner-filtered ordered queries, and live change subscriptions.
//! These traits decouple the session core from the concrete store (remote
//! document database, in-memory adapter for tests).
//!
//! Both collections are append-only from this core's perspective. There are
//! no update or delete operations, so cross-device conflicts reduce to
//! ordering by the store-assigned timestamp.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::conversation::entry::{Entry, NewEntry};
use crate::error::Result;
use crate::run::model::{NewRun, Run};

/// An abstract store for conversation entries.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Assign the document id and creation timestamp server-side
/// - Filter every query on `owner_uid` (the isolation boundary)
/// - Deliver live snapshots ordered by `created_at` ascending
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Appends an immutable entry, returning it with the store-assigned
    /// id and timestamp.
    async fn append(&self, entry: NewEntry) -> Result<Entry>;

    /// Opens a live query over the `(owner_uid, run_id)` partition.
    ///
    /// The receiver holds the current ordered snapshot and is updated with
    /// a fresh snapshot on every underlying change, until dropped. Dropping
    /// the receiver is the unsubscribe.
    async fn watch(&self, owner_uid: &str, run_id: &str) -> Result<watch::Receiver<Vec<Entry>>>;
}

/// An abstract store for run summaries.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Appends an immutable run summary, returning it with the
    /// store-assigned creation timestamp.
    async fn append(&self, run: NewRun) -> Result<Run>;

    /// Returns at most `limit` runs owned by `owner_uid`, ordered by
    /// `created_at` descending (most recent first). Point-in-time snapshot,
    /// not a subscription.
    async fn recent(&self, owner_uid: &str, limit: usize) -> Result<Vec<Run>>;
}
