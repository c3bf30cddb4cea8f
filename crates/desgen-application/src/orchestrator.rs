//! Generation orchestrator: the sequenced write flow behind "generate".

use std::sync::Arc;

use desgen_core::backend::DesignBackend;
use desgen_core::conversation::NewEntry;
use desgen_core::error::Result;
use desgen_core::identity::Identity;
use desgen_core::run::{NewRun, Run};
use desgen_core::store::{EntryStore, RunStore};

/// Executes the bounded sequence of writes and reads that constitute one
/// generation.
///
/// The steps are strictly ordered, each awaiting the previous, because the
/// conversation's read order must match the write order:
///
/// 1. persist the user entry
/// 2. call the generation backend
/// 3. persist the three labeled assistant entries, in their fixed order
/// 4. persist the run summary
///
/// There is no rollback: a failure after step 1 leaves the user entry in
/// place, so the conversation shows the prompt with no assistant response.
/// There is no automatic retry either; a user-initiated resubmission
/// appends a new user entry rather than replacing the failed one
/// (at-least-once, no deduplication).
pub struct GenerationOrchestrator {
    entry_store: Arc<dyn EntryStore>,
    run_store: Arc<dyn RunStore>,
    backend: Arc<dyn DesignBackend>,
}

impl GenerationOrchestrator {
    /// Creates an orchestrator over the given stores and backend.
    pub fn new(
        entry_store: Arc<dyn EntryStore>,
        run_store: Arc<dyn RunStore>,
        backend: Arc<dyn DesignBackend>,
    ) -> Self {
        Self {
            entry_store,
            run_store,
            backend,
        }
    }

    /// Runs one generation against `(identity, run_id)`.
    ///
    /// # Arguments
    ///
    /// * `identity` - The authenticated principal; callers enforce presence
    /// * `run_id` - The run the conversation is appended under
    /// * `prompt` - Non-empty, trimmed prompt text (caller-enforced)
    ///
    /// # Returns
    ///
    /// The persisted [`Run`] summary, carrying everything the registry
    /// needs for its optimistic prepend.
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` if the backend call fails, or a store
    /// error from any write. See the type docs for the partial-failure
    /// outcome.
    pub async fn generate(&self, identity: &Identity, run_id: &str, prompt: &str) -> Result<Run> {
        tracing::info!(uid = %identity.uid, run_id, "generation started");

        self.entry_store
            .append(NewEntry::user(&identity.uid, run_id, prompt))
            .await?;

        let result = self.backend.generate(prompt).await?;

        for (label, content) in result.sections() {
            self.entry_store
                .append(NewEntry::assistant(&identity.uid, run_id, label, content))
                .await?;
        }

        let run = self
            .run_store
            .append(NewRun::new(run_id, &identity.uid, prompt))
            .await?;

        tracing::info!(uid = %identity.uid, run_id, "generation completed");
        Ok(run)
    }
}
