use anyhow::Result;
use chrono::Utc;
use pulseboard_application::Intent;

use crate::bootstrap::App;

pub async fn show(app: &App, mark_read: Option<u64>, mark_all_read: bool) -> Result<()> {
    app.require_session().await?;
    let coordinator = &app.coordinator;

    if let Some(id) = mark_read {
        coordinator
            .dispatch(Intent::MarkNotificationRead(id))
            .await?;
    }
    if mark_all_read {
        coordinator
            .dispatch(Intent::MarkAllNotificationsRead)
            .await?;
    }

    let inbox = coordinator.notifications().snapshot().await;
    let now = Utc::now();
    println!("{} unread", inbox.unread_count());
    for notification in &inbox.items {
        let marker = if notification.read { ' ' } else { '*' };
        println!(
            "{} [{}] {} ({})",
            marker,
            notification.id,
            notification.message,
            notification.relative_label(now)
        );
    }
    Ok(())
}
