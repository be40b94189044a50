//! Mock notification service.

use async_trait::async_trait;
use chrono::Utc;
use pulseboard_core::Result;
use pulseboard_core::notification::{Notification, NotificationService};

use super::fixtures;

/// Serves the fixture inbox, timestamped relative to the call time.
#[derive(Debug, Default)]
pub struct MockNotificationService;

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        Ok(fixtures::notifications(Utc::now()))
    }
}
