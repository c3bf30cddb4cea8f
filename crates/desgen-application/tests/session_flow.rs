//! End-to-end session scenarios over the in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use desgen_application::SessionController;
use desgen_core::conversation::{Entry, EntryRole, GenerationResult};
use desgen_core::error::{DesgenError, Result};
use desgen_core::identity::{Identity, IdentityGateway};
use desgen_infrastructure::MemoryStore;

struct FixedGateway {
    identity: Identity,
}

#[async_trait]
impl IdentityGateway for FixedGateway {
    async fn sign_in(&self) -> Result<Option<Identity>> {
        Ok(Some(self.identity.clone()))
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}

struct ScriptedBackend {
    fail: AtomicBool,
}

impl ScriptedBackend {
    fn healthy() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }

    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
        }
    }

    fn recover(&self) {
        self.fail.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl desgen_core::backend::DesignBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DesgenError::backend_unavailable("connection refused"));
        }
        Ok(GenerationResult {
            product_plan: format!("Plan for {prompt}"),
            ux_design: format!("UX for {prompt}"),
            visual_design: format!("Visuals for {prompt}"),
        })
    }
}

fn controller_with(
    uid: &str,
    backend: Arc<ScriptedBackend>,
    store: Arc<MemoryStore>,
) -> SessionController {
    SessionController::new(
        Arc::new(FixedGateway {
            identity: Identity::new(uid, "Test User"),
        }),
        store.clone(),
        store,
        backend,
    )
}

async fn wait_for_entries(controller: &SessionController, count: usize) -> Vec<Entry> {
    for _ in 0..100 {
        let entries = controller.entries().await;
        if entries.len() >= count {
            return entries;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {count} entries, got {:?}", controller.entries().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn fresh_run_produces_ordered_conversation_and_run_record() {
    let store = Arc::new(MemoryStore::new());
    let controller = controller_with("uid-1", Arc::new(ScriptedBackend::healthy()), store);
    controller.sign_in().await.unwrap();

    let run = controller.submit("Build a todo app").await.unwrap();

    let entries = wait_for_entries(&controller, 4).await;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].role, EntryRole::User);
    assert_eq!(entries[0].content, "Build a todo app");
    assert_eq!(entries[1].label.as_deref(), Some("Product plan"));
    assert_eq!(entries[2].label.as_deref(), Some("UX design"));
    assert_eq!(entries[3].label.as_deref(), Some("Visual design"));

    // Entries are chronological within the run.
    for pair in entries.windows(2) {
        assert!(pair[0].created_at < pair[1].created_at);
    }

    let runs = controller.runs().await;
    assert_eq!(runs[0].id, run.id);
    assert_eq!(runs[0].owner_uid, "uid-1");
    assert_eq!(runs[0].prompt, "Build a todo app");
}

#[tokio::test(flavor = "multi_thread")]
async fn reselecting_a_run_reproduces_the_same_sequence() {
    let store = Arc::new(MemoryStore::new());
    let controller = controller_with("uid-1", Arc::new(ScriptedBackend::healthy()), store);
    controller.sign_in().await.unwrap();

    let run = controller.submit("Build a todo app").await.unwrap();
    let before = wait_for_entries(&controller, 4).await;

    controller.start_new_run().await;
    assert!(controller.entries().await.is_empty());

    controller.select_run(&run).await.unwrap();
    let after = wait_for_entries(&controller, 4).await;
    assert_eq!(before, after);
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_failure_leaves_prompt_without_response() {
    let store = Arc::new(MemoryStore::new());
    let backend = Arc::new(ScriptedBackend::failing());
    let controller = controller_with("uid-1", backend.clone(), store.clone());
    controller.sign_in().await.unwrap();

    let err = controller.submit("Build a todo app").await.unwrap_err();
    assert!(err.is_backend_unavailable());

    // The failed run never became the selection or a registry row.
    assert_eq!(controller.active_run_id().await, None);
    assert!(controller.runs().await.is_empty());

    // Resubmission after recovery appends a fresh user entry under a new
    // run; the orphaned prompt from the failed attempt stays where it is.
    backend.recover();
    let run = controller.submit("Build a todo app").await.unwrap();
    let entries = wait_for_entries(&controller, 4).await;
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|entry| entry.run_id == run.id));
}

#[tokio::test(flavor = "multi_thread")]
async fn entries_and_runs_are_invisible_across_identities() {
    let store = Arc::new(MemoryStore::new());
    let backend = Arc::new(ScriptedBackend::healthy());

    let alice = controller_with("uid-a", backend.clone(), store.clone());
    alice.sign_in().await.unwrap();
    let run = alice.submit("Alice's app").await.unwrap();
    wait_for_entries(&alice, 4).await;

    let bob = controller_with("uid-b", backend, store);
    bob.sign_in().await.unwrap();

    assert!(bob.runs().await.is_empty());

    // Even subscribing to Alice's run id yields nothing for Bob: the
    // partition is scoped by owner uid.
    bob.select_run(&run).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(bob.entries().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn second_submission_appends_to_the_active_run() {
    let store = Arc::new(MemoryStore::new());
    let controller = controller_with("uid-1", Arc::new(ScriptedBackend::healthy()), store);
    controller.sign_in().await.unwrap();

    let first = controller.submit("Build a todo app").await.unwrap();
    wait_for_entries(&controller, 4).await;

    let second = controller.submit("Add dark mode").await.unwrap();
    assert_eq!(first.id, second.id);

    let entries = wait_for_entries(&controller, 8).await;
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[4].role, EntryRole::User);
    assert_eq!(entries[4].content, "Add dark mode");
}
