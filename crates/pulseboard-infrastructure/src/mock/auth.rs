//! Mock authentication service.

use async_trait::async_trait;
use chrono::Utc;
use pulseboard_core::auth::{AuthGrant, AuthService, Credentials, User};
use pulseboard_core::config::AuthSettings;
use pulseboard_core::{PulseError, Result};
use std::time::Duration;

use super::fixtures;

const VALIDATE_DELAY: Duration = Duration::from_millis(500);
const REVOKE_DELAY: Duration = Duration::from_millis(300);

/// Accepts exactly one configured demo account.
pub struct MockAuthService {
    account: Credentials,
    user: User,
    delay: Duration,
}

impl MockAuthService {
    pub fn new(account: Credentials, delay: Duration) -> Self {
        Self {
            account,
            user: fixtures::demo_user(),
            delay,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.credentials(), settings.delay())
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant> {
        tokio::time::sleep(self.delay).await;

        if *credentials != self.account {
            tracing::debug!(
                "[MockAuthService] Rejected credentials for {:?}",
                credentials.username
            );
            return Err(PulseError::InvalidCredentials);
        }

        Ok(AuthGrant {
            user: self.user.clone(),
            token: format!("demo-jwt-token-{}", Utc::now().timestamp_millis()),
        })
    }

    async fn validate_token(&self, token: &str) -> Result<bool> {
        tokio::time::sleep(VALIDATE_DELAY).await;
        Ok(!token.is_empty())
    }

    async fn revoke(&self, _token: &str) -> Result<()> {
        tokio::time::sleep(REVOKE_DELAY).await;
        Ok(())
    }
}
