//! Notification inbox state.

use pulseboard_core::notification::Notification;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    /// Set once the inbox was seeded for the current session
    pub loaded: bool,
}

impl NotificationState {
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }
}

/// Seeded once per authenticated session; entries are never removed, only
/// marked read.
#[derive(Default)]
pub struct NotificationStore {
    state: RwLock<NotificationState>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> NotificationState {
        self.state.read().await.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    /// Seeds the inbox. Ignored if it was already seeded this session.
    pub async fn set_notifications(&self, items: Vec<Notification>) -> bool {
        let mut state = self.state.write().await;
        if state.loaded {
            tracing::debug!("[NotificationStore] Inbox already seeded, ignoring");
            return false;
        }
        state.items = items;
        state.loaded = true;
        true
    }

    /// Marks one entry read. Unknown ids are ignored.
    pub async fn mark_read(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        match state.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub async fn mark_all_read(&self) {
        let mut state = self.state.write().await;
        for notification in state.items.iter_mut() {
            notification.read = true;
        }
    }

    pub async fn clear(&self) {
        *self.state.write().await = NotificationState::default();
    }
}
