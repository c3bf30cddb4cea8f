//! Identity domain model.

use serde::{Deserialize, Serialize};

/// The authenticated principal owning runs and entries.
///
/// Produced by the identity provider; read-only to this core. The `uid` is
/// the stable identifier every run and entry is partitioned by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque stable identifier assigned by the identity provider.
    pub uid: String,
    /// Human-readable display label (name or email).
    pub display_name: String,
}

impl Identity {
    /// Creates a new identity with the given uid and display label.
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
        }
    }
}
