//! Conversation stream: the live, locally materialized view of one run.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use desgen_core::conversation::Entry;
use desgen_core::error::Result;
use desgen_core::identity::Identity;
use desgen_core::store::EntryStore;

/// Maintains a locally materialized ordered view of one run's entries.
///
/// At most one live watcher exists at any time: [`subscribe`](Self::subscribe)
/// tears down the previous watcher before opening the next one, so a
/// selection change can never produce duplicate delivery or leak a
/// subscription.
///
/// Empty snapshots are suppressed: immediately after a burst of writes the
/// store may deliver a partial or empty frame before all writes are
/// visible, and replacing the view with it would drop the conversation the
/// user is looking at. The materialized view is therefore only replaced by
/// non-empty snapshots; [`detach`](Self::detach) is the explicit
/// "truly empty" signal.
pub struct ConversationStream {
    store: Arc<dyn EntryStore>,
    /// Materialized ordered view, ascending by creation time
    entries: Arc<RwLock<Vec<Entry>>>,
    /// The single live watcher task, if subscribed
    watcher: RwLock<Option<JoinHandle<()>>>,
}

impl ConversationStream {
    /// Creates a detached stream backed by the given store.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            entries: Arc::new(RwLock::new(Vec::new())),
            watcher: RwLock::new(None),
        }
    }

    /// Subscribes to the `(identity, run_id)` partition.
    ///
    /// Any previous watcher is stopped first. The watcher slot stays locked
    /// across the store round trip, so interleaved subscribe calls serialize
    /// and the single-watcher guarantee holds even when a selection changes
    /// while a live query is still being opened. The materialized view is
    /// not cleared here: it is replaced as soon as the new partition
    /// delivers a non-empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot open the live query.
    pub async fn subscribe(&self, identity: &Identity, run_id: &str) -> Result<()> {
        let mut watcher = self.watcher.write().await;
        if let Some(handle) = watcher.take() {
            handle.abort();
        }

        let mut snapshots = self.store.watch(&identity.uid, run_id).await?;
        tracing::debug!(uid = %identity.uid, run_id, "conversation subscribed");

        let entries = Arc::clone(&self.entries);
        let handle = tokio::spawn(async move {
            loop {
                let snapshot = snapshots.borrow_and_update().clone();
                // Stale-empty accommodation: keep the prior view on an
                // empty frame.
                if !snapshot.is_empty() {
                    *entries.write().await = snapshot;
                }
                if snapshots.changed().await.is_err() {
                    break;
                }
            }
        });

        *watcher = Some(handle);
        Ok(())
    }

    /// Stops the watcher and clears the materialized view.
    ///
    /// Used on sign-out and "start a new run"; this is the only path that
    /// legitimately empties the view.
    pub async fn detach(&self) {
        let mut watcher = self.watcher.write().await;
        if let Some(handle) = watcher.take() {
            handle.abort();
        }
        self.entries.write().await.clear();
    }

    /// Returns a snapshot of the materialized view.
    pub async fn entries(&self) -> Vec<Entry> {
        self.entries.read().await.clone()
    }
}
