//! Error types for the Desgen session core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Desgen session core.
///
/// This provides typed, structured error variants covering the failure
/// taxonomy of the session core: missing identity, unreachable generation
/// backend, recoverable run-list fetch failures, and store access errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DesgenError {
    /// No identity is present for an operation that requires one.
    #[error("Sign in to generate outputs and save runs")]
    Unauthenticated,

    /// The generation backend could not be reached or returned a
    /// non-success response. The underlying cause (transport failure vs.
    /// non-2xx status) is deliberately not distinguished.
    #[error("Unable to reach the design backend: {0}")]
    BackendUnavailable(String),

    /// The recent-run fetch failed. Recoverable: the registry degrades to
    /// an empty list and the fetch can be retried.
    #[error("Failed to load recent runs: {0}")]
    FetchFailed(String),

    /// Data access error (store/subscription layer).
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DesgenError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a BackendUnavailable error
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }

    /// Creates a FetchFailed error
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a BackendUnavailable error
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }

    /// Check if this error is recoverable without user-visible surfacing.
    ///
    /// Returns true for `FetchFailed`, which degrades to an empty run list
    /// and is retried on the next identity change or manual reload.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }
}

impl From<serde_json::Error> for DesgenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Conversion from String (for error messages)
impl From<String> for DesgenError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, DesgenError>`.
pub type Result<T> = std::result::Result<T, DesgenError>;
