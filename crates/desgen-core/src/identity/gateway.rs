//! Identity provider gateway trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::identity::model::Identity;

/// An abstract gateway to the external identity provider.
///
/// The sign-in flow itself is opaque to this core: it either produces an
/// [`Identity`], reports that the user cancelled, or fails. Sign-out clears
/// the provider-side session.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Runs the provider's sign-in flow.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))`: sign-in completed
    /// - `Ok(None)`: the user cancelled the flow
    /// - `Err(_)`: the provider failed
    async fn sign_in(&self) -> Result<Option<Identity>>;

    /// Clears the provider-side session.
    async fn sign_out(&self) -> Result<()>;
}
