//! Notification data-source contract.

use async_trait::async_trait;

use super::model::Notification;
use crate::error::Result;

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Fetches the notification inbox for the signed-in user.
    async fn fetch_notifications(&self) -> Result<Vec<Notification>>;
}
