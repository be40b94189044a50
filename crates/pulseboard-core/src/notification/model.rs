//! Notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbox entry shown in the notification menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique within the inbox
    pub id: u64,
    pub message: String,
    pub read: bool,
    /// Serialized as an ISO-8601 timestamp
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Human-readable age of the notification relative to `now`.
    ///
    /// Anything older than a week falls back to an `MM/DD/YYYY` date.
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        let seconds = (now - self.timestamp).num_seconds();

        if seconds < 60 {
            "just now".to_string()
        } else if seconds < 3_600 {
            format!("{} minutes ago", seconds / 60)
        } else if seconds < 86_400 {
            format!("{} hours ago", seconds / 3_600)
        } else if seconds < 604_800 {
            format!("{} days ago", seconds / 86_400)
        } else {
            self.timestamp.format("%m/%d/%Y").to_string()
        }
    }
}
