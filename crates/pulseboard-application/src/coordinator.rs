//! Intent handling.
//!
//! The [`EffectCoordinator`] is the only writer of the stores besides the
//! live-update timer. Each intent runs as its own task; calls to the data
//! source are guarded by a [`RequestChannel`] so only the latest call of a
//! kind is applied. Data source failures end up as strings in the stores'
//! `error` slots and never reach the caller.

use pulseboard_core::auth::{AuthService, Credentials};
use pulseboard_core::dashboard::DashboardService;
use pulseboard_core::notification::NotificationService;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::channel::RequestChannel;
use crate::dashboard_store::DashboardStore;
use crate::live_update::LiveUpdateScheduler;
use crate::notification_store::NotificationStore;
use crate::session_store::SessionStore;

pub const LOGIN_FALLBACK: &str = "An error occurred during login";
pub const FETCH_FALLBACK: &str = "Failed to fetch dashboard data";
pub const REFRESH_FALLBACK: &str = "Failed to update stats";

/// A request for a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login(Credentials),
    Logout,
    FetchDashboard,
    RefreshStats,
    DeleteActivity(u64),
    MarkNotificationRead(u64),
    MarkAllNotificationsRead,
}

/// The data source collaborators.
#[derive(Clone)]
pub struct DataSources {
    pub auth: Arc<dyn AuthService>,
    pub dashboard: Arc<dyn DashboardService>,
    pub notifications: Arc<dyn NotificationService>,
}

struct Channels {
    login: RequestChannel,
    fetch: RequestChannel,
    refresh: RequestChannel,
    notifications: RequestChannel,
}

impl Channels {
    fn new() -> Self {
        Self {
            login: RequestChannel::new("login"),
            fetch: RequestChannel::new("dashboard-fetch"),
            refresh: RequestChannel::new("stats-refresh"),
            notifications: RequestChannel::new("notifications"),
        }
    }

    fn all(&self) -> [&RequestChannel; 4] {
        [&self.login, &self.fetch, &self.refresh, &self.notifications]
    }
}

#[derive(Clone)]
pub struct EffectCoordinator {
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardStore>,
    notifications: Arc<NotificationStore>,
    sources: DataSources,
    channels: Arc<Channels>,
    live_update: Option<Arc<LiveUpdateScheduler>>,
}

impl EffectCoordinator {
    pub fn new(
        session: Arc<SessionStore>,
        dashboard: Arc<DashboardStore>,
        notifications: Arc<NotificationStore>,
        sources: DataSources,
    ) -> Self {
        Self {
            session,
            dashboard,
            notifications,
            sources,
            channels: Arc::new(Channels::new()),
            live_update: None,
        }
    }

    /// Stops `scheduler` on logout.
    pub fn with_live_updates(mut self, scheduler: Arc<LiveUpdateScheduler>) -> Self {
        self.live_update = Some(scheduler);
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn dashboard(&self) -> &Arc<DashboardStore> {
        &self.dashboard
    }

    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    /// Handles `intent` on a new task.
    ///
    /// Supersession is decided here, synchronously: an intent dispatched later
    /// always wins over an earlier one of the same kind, however the tasks are
    /// scheduled. Awaiting the handle is optional.
    pub fn dispatch(&self, intent: Intent) -> JoinHandle<()> {
        tracing::debug!(?intent, "[EffectCoordinator] Dispatch");
        let this = self.clone();

        match intent {
            Intent::Login(credentials) => {
                let ticket = self.channels.login.issue();
                tokio::spawn(async move {
                    // A logout or newer login may already have superseded us.
                    if !this
                        .channels
                        .login
                        .settle(ticket, this.session.request_login())
                        .await
                    {
                        return;
                    }
                    let outcome = this.sources.auth.authenticate(&credentials).await;
                    let succeeded = outcome.is_ok();

                    let applied = this
                        .channels
                        .login
                        .settle(ticket, async {
                            match outcome {
                                Ok(grant) => {
                                    this.session.login_succeeded(grant.user, grant.token).await
                                }
                                Err(e) => {
                                    this.session
                                        .login_failed(e.user_message(LOGIN_FALLBACK))
                                        .await
                                }
                            }
                        })
                        .await;

                    if applied && succeeded {
                        this.load_notifications().await;
                    }
                })
            }
            Intent::Logout => {
                for channel in self.channels.all() {
                    channel.invalidate();
                }
                if let Some(scheduler) = &self.live_update {
                    scheduler.stop();
                }
                tokio::spawn(async move { this.logout().await })
            }
            Intent::FetchDashboard => {
                let ticket = self.channels.fetch.issue();
                tokio::spawn(async move {
                    if !this
                        .channels
                        .fetch
                        .settle(ticket, this.dashboard.request_fetch())
                        .await
                    {
                        return;
                    }
                    let outcome = this
                        .sources
                        .dashboard
                        .fetch_dashboard()
                        .await
                        .and_then(|snapshot| snapshot.validate().map(|()| snapshot));

                    this.channels
                        .fetch
                        .settle(ticket, async {
                            match outcome {
                                Ok(snapshot) => this.dashboard.fetch_succeeded(snapshot).await,
                                Err(e) => {
                                    tracing::warn!(
                                        "[EffectCoordinator] Dashboard fetch failed: {}",
                                        e
                                    );
                                    this.dashboard
                                        .fetch_failed(e.user_message(FETCH_FALLBACK))
                                        .await
                                }
                            }
                        })
                        .await;
                })
            }
            Intent::RefreshStats => {
                let ticket = self.channels.refresh.issue();
                tokio::spawn(async move {
                    let outcome = this.sources.dashboard.refresh_stats().await;

                    this.channels
                        .refresh
                        .settle(ticket, async {
                            match outcome {
                                Ok(stats) => this.dashboard.patch_stats(stats).await,
                                Err(e) => {
                                    tracing::warn!(
                                        "[EffectCoordinator] Stats refresh failed: {}",
                                        e
                                    );
                                    this.dashboard
                                        .refresh_failed(e.user_message(REFRESH_FALLBACK))
                                        .await
                                }
                            }
                        })
                        .await;
                })
            }
            Intent::DeleteActivity(id) => tokio::spawn(async move {
                this.dashboard.delete_activity(id).await;
            }),
            Intent::MarkNotificationRead(id) => tokio::spawn(async move {
                this.notifications.mark_read(id).await;
            }),
            Intent::MarkAllNotificationsRead => tokio::spawn(async move {
                this.notifications.mark_all_read().await;
            }),
        }
    }

    /// Restores the session from durable storage and, if authenticated,
    /// seeds the notification inbox.
    ///
    /// A stored token the auth source rejects is erased. If the source cannot
    /// be reached the restored session is kept.
    ///
    /// Returns whether a session was restored.
    pub async fn restore_session(&self) -> bool {
        if !self.session.restore_from_storage().await {
            return false;
        }

        let token = self.session.token().await.unwrap_or_default();
        match self.sources.auth.validate_token(&token).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("[EffectCoordinator] Stored token rejected, clearing session");
                self.session.logout().await;
                return false;
            }
            Err(e) => tracing::warn!(
                "[EffectCoordinator] Token validation failed, keeping session: {}",
                e
            ),
        }

        self.load_notifications().await;
        true
    }

    async fn load_notifications(&self) {
        let ticket = self.channels.notifications.issue();
        match self.sources.notifications.fetch_notifications().await {
            Ok(items) => {
                self.channels
                    .notifications
                    .settle(ticket, async {
                        // Logout clears the session before the inbox, so this
                        // check under the gate keeps a late seed out.
                        if self.session.is_authenticated().await {
                            self.notifications.set_notifications(items).await;
                        } else {
                            tracing::debug!(
                                "[EffectCoordinator] Session ended, dropping notifications"
                            );
                        }
                    })
                    .await;
            }
            Err(e) => tracing::warn!("[EffectCoordinator] Failed to load notifications: {}", e),
        }
    }

    async fn logout(&self) {
        // Let any result that passed its check before invalidation land first.
        for channel in self.channels.all() {
            channel.drain().await;
        }

        let token = self.session.token().await;
        self.session.logout().await;
        self.dashboard.reset().await;
        self.notifications.clear().await;

        if let Some(token) = token {
            let auth = self.sources.auth.clone();
            tokio::spawn(async move {
                match auth.revoke(&token).await {
                    Ok(()) => tracing::debug!("[EffectCoordinator] Token revoked"),
                    Err(e) => tracing::warn!("[EffectCoordinator] Token revocation failed: {}", e),
                }
            });
        }
    }
}
