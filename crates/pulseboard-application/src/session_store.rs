//! Authentication state and its durable copy.

use pulseboard_core::auth::User;
use pulseboard_core::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authentication state read by the view.
///
/// `is_authenticated` implies `token` is present. `error` present implies
/// `is_authenticated == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Holds the session and owns its durable `token`/`user` entries.
///
/// Storage failures are logged and swallowed; the in-memory state stays the
/// source of truth for the running process.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn request_login(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
        tracing::debug!("[SessionStore] Login requested");
    }

    /// Marks the session authenticated and persists `token` and `user`.
    pub async fn login_succeeded(&self, user: User, token: String) {
        {
            let mut state = self.state.write().await;
            *state = SessionState {
                is_authenticated: true,
                user: Some(user.clone()),
                token: Some(token.clone()),
                loading: false,
                error: None,
            };
        }
        tracing::info!(user = %user.name, "[SessionStore] Login succeeded");

        if let Err(e) = self.storage.set(TOKEN_KEY, token).await {
            tracing::warn!("[SessionStore] Failed to persist token: {}", e);
        }
        match serde_json::to_string(&user) {
            Ok(serialized) => {
                if let Err(e) = self.storage.set(USER_KEY, serialized).await {
                    tracing::warn!("[SessionStore] Failed to persist user: {}", e);
                }
            }
            Err(e) => tracing::warn!("[SessionStore] Failed to serialize user: {}", e),
        }
    }

    pub async fn login_failed(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(error = %message, "[SessionStore] Login failed");
        let mut state = self.state.write().await;
        *state = SessionState {
            error: Some(message),
            ..SessionState::default()
        };
    }

    /// Clears every field and erases the durable entries.
    pub async fn logout(&self) {
        *self.state.write().await = SessionState::default();

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!("[SessionStore] Failed to remove {:?}: {}", key, e);
            }
        }
        tracing::info!("[SessionStore] Logged out");
    }

    /// Rebuilds the session from durable storage.
    ///
    /// A stored token alone is enough to authenticate; an unreadable or
    /// malformed user record is treated as absent. Never fails.
    ///
    /// Returns whether the session is now authenticated.
    pub async fn restore_from_storage(&self) -> bool {
        let token = match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read token: {}", e);
                None
            }
        };
        let Some(token) = token else {
            tracing::debug!("[SessionStore] No stored session");
            return false;
        };

        let user = match self.storage.get(USER_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("[SessionStore] Ignoring malformed stored user: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read user: {}", e);
                None
            }
        };

        tracing::info!(
            has_user = user.is_some(),
            "[SessionStore] Restored session from storage"
        );
        *self.state.write().await = SessionState {
            is_authenticated: true,
            user,
            token: Some(token),
            loading: false,
            error: None,
        };
        true
    }
}
