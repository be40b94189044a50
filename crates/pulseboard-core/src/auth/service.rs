//! Authentication data-source contract.

use async_trait::async_trait;

use super::model::{AuthGrant, Credentials};
use crate::error::Result;

/// Remote-style authentication source.
///
/// Implementations may take arbitrarily long to resolve; callers treat each
/// call as a suspension point and never assume ordering between calls.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies a credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::InvalidCredentials`](crate::PulseError::InvalidCredentials)
    /// when the pair is not accepted.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// Checks whether a previously issued token is still usable.
    async fn validate_token(&self, token: &str) -> Result<bool>;

    /// Invalidates a token on the remote side.
    async fn revoke(&self, token: &str) -> Result<()>;
}
