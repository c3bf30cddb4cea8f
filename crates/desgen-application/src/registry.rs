//! Run registry: the cached list of the identity's most recent runs.

use std::sync::Arc;
use tokio::sync::RwLock;

use desgen_core::error::DesgenError;
use desgen_core::identity::Identity;
use desgen_core::run::Run;
use desgen_core::store::RunStore;

/// Maximum number of runs kept in the registry.
pub const RECENT_RUN_LIMIT: usize = 5;

/// Loads and caches the most recent runs belonging to the current identity.
///
/// The registry is a one-shot fetch, not a live subscription: it is allowed
/// to go stale until the next reload (identity change, or a new run being
/// created). A fetch failure degrades to an empty list plus a recoverable
/// error state; it never blocks run selection.
pub struct RunRegistry {
    store: Arc<dyn RunStore>,
    /// In-memory run cache, most recent first
    runs: RwLock<Vec<Run>>,
    /// Last recoverable fetch failure, cleared on the next successful load
    last_error: RwLock<Option<DesgenError>>,
}

impl RunRegistry {
    /// Creates a new empty registry backed by the given store.
    pub fn new(store: Arc<dyn RunStore>) -> Self {
        Self {
            store,
            runs: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
        }
    }

    /// Loads the identity's most recent runs, replacing the cache.
    ///
    /// At most [`RECENT_RUN_LIMIT`] runs, most recent first. On failure the
    /// cache becomes empty and the error is retained in
    /// [`last_error`](Self::last_error) instead of being propagated.
    pub async fn load_recent(&self, identity: &Identity) {
        match self.store.recent(&identity.uid, RECENT_RUN_LIMIT).await {
            Ok(runs) => {
                *self.runs.write().await = runs;
                *self.last_error.write().await = None;
            }
            Err(err) => {
                tracing::warn!(uid = %identity.uid, error = %err, "run list fetch failed");
                *self.runs.write().await = Vec::new();
                *self.last_error.write().await =
                    Some(DesgenError::fetch_failed(err.to_string()));
            }
        }
    }

    /// Optimistically prepends a freshly persisted run to the cache.
    ///
    /// Called after the orchestrator persists a new run remotely, so the
    /// run is selectable immediately without waiting on a reload. A cached
    /// row with the same run id is replaced rather than duplicated, so
    /// resubmitting on an already-active run moves it to the front. The
    /// cache is truncated back to [`RECENT_RUN_LIMIT`].
    pub async fn record_locally(&self, run: Run) {
        let mut runs = self.runs.write().await;
        runs.retain(|existing| existing.id != run.id);
        runs.insert(0, run);
        runs.truncate(RECENT_RUN_LIMIT);
    }

    /// Returns a snapshot of the cached runs, most recent first.
    pub async fn runs(&self) -> Vec<Run> {
        self.runs.read().await.clone()
    }

    /// Returns the last recoverable fetch failure, if any.
    pub async fn last_error(&self) -> Option<DesgenError> {
        self.last_error.read().await.clone()
    }

    /// Discards all cached runs and any retained error.
    ///
    /// Part of the sign-out hard reset.
    pub async fn clear(&self) {
        self.runs.write().await.clear();
        *self.last_error.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use desgen_core::error::Result;
    use desgen_core::run::NewRun;
    use std::sync::Mutex;

    // Mock RunStore for testing
    struct MockRunStore {
        runs: Mutex<Vec<Run>>,
        fail: bool,
    }

    impl MockRunStore {
        fn with_runs(runs: Vec<Run>) -> Self {
            Self {
                runs: Mutex::new(runs),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                runs: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl RunStore for MockRunStore {
        async fn append(&self, run: NewRun) -> Result<Run> {
            let run = Run {
                id: run.id,
                owner_uid: run.owner_uid,
                prompt: run.prompt,
                created_at: Utc::now(),
            };
            self.runs.lock().unwrap().push(run.clone());
            Ok(run)
        }

        async fn recent(&self, owner_uid: &str, limit: usize) -> Result<Vec<Run>> {
            if self.fail {
                return Err(DesgenError::data_access("store offline"));
            }
            let mut runs: Vec<Run> = self
                .runs
                .lock()
                .unwrap()
                .iter()
                .filter(|run| run.owner_uid == owner_uid)
                .cloned()
                .collect();
            runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            runs.truncate(limit);
            Ok(runs)
        }
    }

    fn run(id: &str, owner: &str, secs: i64) -> Run {
        Run {
            id: id.to_string(),
            owner_uid: owner.to_string(),
            prompt: format!("prompt {id}"),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_load_recent_orders_and_limits() {
        let runs: Vec<Run> = (0..7).map(|i| run(&format!("r{i}"), "uid-1", i)).collect();
        let registry = RunRegistry::new(Arc::new(MockRunStore::with_runs(runs)));

        registry
            .load_recent(&Identity::new("uid-1", "Ada"))
            .await;

        let cached = registry.runs().await;
        assert_eq!(cached.len(), RECENT_RUN_LIMIT);
        assert_eq!(cached[0].id, "r6");
        assert_eq!(cached[4].id, "r2");
        assert!(registry.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_load_recent_is_scoped_to_owner() {
        let runs = vec![run("ra", "uid-a", 1), run("rb", "uid-b", 2)];
        let registry = RunRegistry::new(Arc::new(MockRunStore::with_runs(runs)));

        registry.load_recent(&Identity::new("uid-a", "Ada")).await;

        let cached = registry.runs().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "ra");
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_list() {
        let registry = RunRegistry::new(Arc::new(MockRunStore::failing()));

        registry.load_recent(&Identity::new("uid-1", "Ada")).await;

        assert!(registry.runs().await.is_empty());
        let err = registry.last_error().await.unwrap();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_record_locally_prepends_and_truncates() {
        let runs: Vec<Run> = (0..5).map(|i| run(&format!("r{i}"), "uid-1", i)).collect();
        let registry = RunRegistry::new(Arc::new(MockRunStore::with_runs(runs)));
        registry.load_recent(&Identity::new("uid-1", "Ada")).await;

        registry.record_locally(run("fresh", "uid-1", 100)).await;

        let cached = registry.runs().await;
        assert_eq!(cached.len(), RECENT_RUN_LIMIT);
        assert_eq!(cached[0].id, "fresh");
    }

    #[tokio::test]
    async fn test_record_locally_replaces_row_with_same_run_id() {
        let runs = vec![run("r0", "uid-1", 0), run("r1", "uid-1", 1)];
        let registry = RunRegistry::new(Arc::new(MockRunStore::with_runs(runs)));
        registry.load_recent(&Identity::new("uid-1", "Ada")).await;

        // A second submission on the already-cached run moves it to the
        // front instead of duplicating its row.
        registry.record_locally(run("r0", "uid-1", 100)).await;

        let cached = registry.runs().await;
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, "r0");
        assert_eq!(cached[1].id, "r1");
    }

    #[tokio::test]
    async fn test_clear_discards_cache_and_error() {
        let registry = RunRegistry::new(Arc::new(MockRunStore::failing()));
        registry.load_recent(&Identity::new("uid-1", "Ada")).await;

        registry.clear().await;

        assert!(registry.runs().await.is_empty());
        assert!(registry.last_error().await.is_none());
    }
}
