//! Run session: the active run selection and the draft prompt.

use tokio::sync::RwLock;
use uuid::Uuid;

use desgen_core::run::Run;

/// Holds the currently selected run identifier and the draft prompt text.
///
/// A freshly minted run id is not "active": [`ensure_run_id`] synthesizes
/// one for the next generation without registering it, so an empty run never
/// leaks into the registry. The id only becomes the active selection when a
/// generation succeeds against it and the caller invokes
/// [`select_run`](Self::select_run).
///
/// [`ensure_run_id`]: Self::ensure_run_id
pub struct RunSession {
    active_run_id: RwLock<Option<String>>,
    draft_prompt: RwLock<String>,
}

impl RunSession {
    /// Creates a session with no selection and an empty draft.
    pub fn new() -> Self {
        Self {
            active_run_id: RwLock::new(None),
            draft_prompt: RwLock::new(String::new()),
        }
    }

    /// Returns the active run id, if a run is selected.
    pub async fn active_run_id(&self) -> Option<String> {
        self.active_run_id.read().await.clone()
    }

    /// Returns the draft prompt text.
    pub async fn draft_prompt(&self) -> String {
        self.draft_prompt.read().await.clone()
    }

    /// Replaces the draft prompt text.
    pub async fn set_draft_prompt(&self, prompt: impl Into<String>) {
        *self.draft_prompt.write().await = prompt.into();
    }

    /// Returns the run id the next generation should target.
    ///
    /// If a run is selected, its id is returned. Otherwise a new globally
    /// unique id is synthesized (UUID v4, collision probability negligible)
    /// without being registered as active.
    pub async fn ensure_run_id(&self) -> String {
        match self.active_run_id.read().await.as_ref() {
            Some(id) => id.clone(),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// Selects a run: the id becomes active and the draft prompt is
    /// replaced by the run's prompt.
    pub async fn select_run(&self, run: &Run) {
        *self.active_run_id.write().await = Some(run.id.clone());
        *self.draft_prompt.write().await = run.prompt.clone();
    }

    /// Clears the selection and the draft prompt ("start a new run").
    pub async fn reset(&self) {
        *self.active_run_id.write().await = None;
        self.draft_prompt.write().await.clear();
    }
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}
