//! Identity provider trait.

use crate::errors::ProviderError;
use crate::types::{AppleIdCredential, AuthorizationRequest};
use async_trait::async_trait;

/// The remote identity provider.
///
/// `authorize` is the single suspension point of a sign-in attempt. The
/// answer may arrive after an arbitrary delay or never; callers bound the
/// wait and drop the attempt to cancel.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Ask the user to authorize the request
    async fn authorize(
        &self,
        request: AuthorizationRequest,
    ) -> std::result::Result<AppleIdCredential, ProviderError>;
}
