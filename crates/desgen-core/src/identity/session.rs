//! Identity session state.
//!
//! Holds the current identity (or none) and notifies observers on change.
//! The transition to "none" is the hard-reset signal consumed by every
//! dependent component: cached runs, the active run selection, the draft
//! prompt, and the materialized conversation must all be discarded.

use tokio::sync::watch;

use crate::identity::model::Identity;

/// Holds the current [`Identity`] or none, with change notification.
///
/// The state lives inside a `tokio::sync::watch` channel, so any number of
/// observers can follow sign-in/sign-out transitions without polling.
pub struct IdentitySession {
    state: watch::Sender<Option<Identity>>,
}

impl IdentitySession {
    /// Creates a new session with no identity.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// Returns the current identity, if signed in.
    pub fn current(&self) -> Option<Identity> {
        self.state.borrow().clone()
    }

    /// Returns true if an identity is present.
    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Replaces the current identity and notifies observers.
    ///
    /// `None` means signed out. The value is always broadcast, even when it
    /// equals the previous one, so observers see every provider callback.
    pub fn set(&self, identity: Option<Identity>) {
        self.state.send_replace(identity);
    }

    /// Subscribes to identity changes.
    ///
    /// The receiver immediately holds the current value and is marked
    /// changed on every subsequent [`set`](Self::set).
    pub fn changes(&self) -> watch::Receiver<Option<Identity>> {
        self.state.subscribe()
    }
}

impl Default for IdentitySession {
    fn default() -> Self {
        Self::new()
    }
}
