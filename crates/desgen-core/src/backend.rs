//! Generation backend capability trait.

use async_trait::async_trait;

use crate::conversation::result::GenerationResult;
use crate::error::Result;

/// An abstract client for the generation backend.
///
/// A single request/response capability: one prompt in, one fixed-shape
/// result out. Implementations must map every failure (transport error or
/// non-success status alike) to [`DesgenError::BackendUnavailable`], so the
/// caller never distinguishes causes.
///
/// [`DesgenError::BackendUnavailable`]: crate::error::DesgenError::BackendUnavailable
#[async_trait]
pub trait DesignBackend: Send + Sync {
    /// Generates the three design sections for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;
}
