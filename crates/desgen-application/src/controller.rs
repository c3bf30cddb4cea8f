//! Session controller: composes the session core into one owned state tree.
//!
//! All transient session state (identity, cached runs, active run, draft
//! prompt, materialized conversation) is owned here, with a single reset
//! path driven by identity changes. There are no ambient globals.

use std::sync::Arc;

use desgen_core::backend::DesignBackend;
use desgen_core::conversation::Entry;
use desgen_core::error::{DesgenError, Result};
use desgen_core::identity::{Identity, IdentityGateway, IdentitySession};
use desgen_core::run::Run;
use desgen_core::store::{EntryStore, RunStore};
use tokio::sync::watch;

use crate::conversation::ConversationStream;
use crate::orchestrator::GenerationOrchestrator;
use crate::registry::RunRegistry;
use crate::session::RunSession;

/// Coordinates the identity session, run registry, run selection, live
/// conversation, and generation flow.
///
/// Concurrency note: operations interleave at every await point but are
/// never parallel over shared memory. A generation may complete against a
/// run that is no longer the active selection; its writes still land under
/// the correct `run_id`, the live view has simply moved on. Selecting a new
/// run or signing out detaches subscriptions and clears local view state
/// only, it does not abort writes already issued.
pub struct SessionController {
    identity: IdentitySession,
    gateway: Arc<dyn IdentityGateway>,
    registry: RunRegistry,
    run_session: RunSession,
    conversation: ConversationStream,
    orchestrator: GenerationOrchestrator,
}

impl SessionController {
    /// Wires a controller over the given capabilities.
    pub fn new(
        gateway: Arc<dyn IdentityGateway>,
        entry_store: Arc<dyn EntryStore>,
        run_store: Arc<dyn RunStore>,
        backend: Arc<dyn DesignBackend>,
    ) -> Self {
        Self {
            identity: IdentitySession::new(),
            gateway,
            registry: RunRegistry::new(run_store.clone()),
            run_session: RunSession::new(),
            conversation: ConversationStream::new(entry_store.clone()),
            orchestrator: GenerationOrchestrator::new(entry_store, run_store, backend),
        }
    }

    // ============================================================================
    // Identity lifecycle
    // ============================================================================

    /// Runs the provider sign-in flow and, on success, loads the new
    /// identity's recent runs.
    ///
    /// # Returns
    ///
    /// The signed-in identity, or `None` if the user cancelled the flow
    /// (in which case nothing changes).
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails.
    pub async fn sign_in(&self) -> Result<Option<Identity>> {
        let Some(identity) = self.gateway.sign_in().await? else {
            return Ok(None);
        };
        self.identity.set(Some(identity.clone()));
        self.handle_identity_change(Some(&identity)).await;
        Ok(Some(identity))
    }

    /// Signs out and hard-resets all dependent state.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails; local state is reset
    /// regardless, so stale data from the previous identity is never
    /// visible.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.gateway.sign_out().await;
        self.identity.set(None);
        self.handle_identity_change(None).await;
        result
    }

    /// Applies an identity transition coming from the provider.
    ///
    /// On `None` every dependent component discards its state: cached runs,
    /// active run, draft prompt, and materialized entries. On `Some` the
    /// same reset runs first (a direct identity-to-identity switch must not
    /// leak the previous identity's state), then the run list is reloaded.
    pub async fn handle_identity_change(&self, identity: Option<&Identity>) {
        self.registry.clear().await;
        self.run_session.reset().await;
        self.conversation.detach().await;

        if let Some(identity) = identity {
            tracing::debug!(uid = %identity.uid, "identity changed, reloading runs");
            self.registry.load_recent(identity).await;
        } else {
            tracing::debug!("signed out, session state cleared");
        }
    }

    /// Returns the current identity, if signed in.
    pub fn current_identity(&self) -> Option<Identity> {
        self.identity.current()
    }

    /// Subscribes to identity changes.
    pub fn identity_changes(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.changes()
    }

    // ============================================================================
    // Run selection and conversation
    // ============================================================================

    /// Selects a run: activates its id, restores its prompt as the draft,
    /// and resubscribes the conversation to it.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` if no identity is present, or a store
    /// error if the live query cannot be opened.
    pub async fn select_run(&self, run: &Run) -> Result<()> {
        let identity = self.identity.current().ok_or(DesgenError::Unauthenticated)?;
        self.run_session.select_run(run).await;
        self.conversation.subscribe(&identity, &run.id).await
    }

    /// Starts a new run: clears the selection, the draft prompt, and the
    /// materialized conversation.
    pub async fn start_new_run(&self) {
        self.run_session.reset().await;
        self.conversation.detach().await;
    }

    /// Returns the cached runs, most recent first.
    pub async fn runs(&self) -> Vec<Run> {
        self.registry.runs().await
    }

    /// Returns the last recoverable run-fetch failure, if any.
    pub async fn run_fetch_error(&self) -> Option<DesgenError> {
        self.registry.last_error().await
    }

    /// Returns the materialized conversation of the active run.
    pub async fn entries(&self) -> Vec<Entry> {
        self.conversation.entries().await
    }

    /// Returns the active run id, if a run is selected.
    pub async fn active_run_id(&self) -> Option<String> {
        self.run_session.active_run_id().await
    }

    /// Returns the draft prompt text.
    pub async fn draft_prompt(&self) -> String {
        self.run_session.draft_prompt().await
    }

    /// Replaces the draft prompt text.
    pub async fn set_draft_prompt(&self, prompt: impl Into<String>) {
        self.run_session.set_draft_prompt(prompt).await;
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Submits a prompt against the active run (or a freshly minted one).
    ///
    /// On success the new run summary is prepended to the registry, the run
    /// becomes the active selection, and the conversation resubscribes to
    /// it, so the generated entries stream into the live view.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without an identity, an internal error for
    /// an empty prompt, and otherwise whatever the orchestrator surfaces
    /// (see [`GenerationOrchestrator::generate`] for the partial-failure
    /// outcome).
    pub async fn submit(&self, prompt: &str) -> Result<Run> {
        let identity = self.identity.current().ok_or(DesgenError::Unauthenticated)?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(DesgenError::internal("prompt must not be empty"));
        }

        let run_id = self.run_session.ensure_run_id().await;
        let run = self.orchestrator.generate(&identity, &run_id, prompt).await?;

        self.registry.record_locally(run.clone()).await;
        self.run_session.select_run(&run).await;
        self.conversation.subscribe(&identity, &run.id).await?;

        Ok(run)
    }
}
