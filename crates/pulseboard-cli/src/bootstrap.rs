//! Composition root: wires config, storage, data sources and stores.

use anyhow::{Context, Result, bail};
use pulseboard_application::{
    DashboardStore, DataSources, EffectCoordinator, LiveUpdateScheduler, NotificationStore,
    SessionStore,
};
use pulseboard_core::config::AppConfig;
use pulseboard_infrastructure::{
    ConfigService, JsonFileKeyValueStore, MockAuthService, MockDashboardService,
    MockNotificationService, PulsePaths,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,pulseboard=info";

pub fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    service
        .load()
        .with_context(|| format!("Failed to load config from {:?}", service.path()))
}

/// `RUST_LOG` wins, then `logging.level`, then [`DEFAULT_FILTER`].
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            config
                .logging
                .level
                .as_deref()
                .and_then(|level| EnvFilter::try_new(level).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub struct App {
    pub config: AppConfig,
    pub coordinator: EffectCoordinator,
    pub live_update: Arc<LiveUpdateScheduler>,
}

impl App {
    /// Builds the stores over the session file.
    ///
    /// The session file is `storage` if given, else `storage.path` from the
    /// config, else the platform default.
    pub async fn build(config: AppConfig, storage: Option<PathBuf>) -> Result<Self> {
        let session_path = match storage.or_else(|| config.storage.path.clone()) {
            Some(path) => path,
            None => PulsePaths::session_file()?,
        };
        let storage = JsonFileKeyValueStore::open(session_path.clone())
            .await
            .with_context(|| format!("Failed to open session file {:?}", session_path))?;
        tracing::debug!(path = ?session_path, "[Bootstrap] Session storage ready");

        let dashboard = Arc::new(DashboardStore::new());
        let live_update = Arc::new(LiveUpdateScheduler::new(
            dashboard.clone(),
            &config.live_update,
        ));

        let sources = DataSources {
            auth: Arc::new(MockAuthService::from_settings(&config.auth)),
            dashboard: Arc::new(MockDashboardService::from_settings(&config.dashboard)),
            notifications: Arc::new(MockNotificationService),
        };
        let coordinator = EffectCoordinator::new(
            Arc::new(SessionStore::new(Arc::new(storage))),
            dashboard,
            Arc::new(NotificationStore::new()),
            sources,
        )
        .with_live_updates(live_update.clone());

        Ok(Self {
            config,
            coordinator,
            live_update,
        })
    }

    /// Restores the stored session, failing if there is none.
    pub async fn require_session(&self) -> Result<()> {
        if !self.coordinator.restore_session().await {
            bail!("Not logged in. Run `pulseboard login` first.");
        }
        Ok(())
    }

    pub fn shutdown(&self) {
        self.live_update.shutdown();
    }
}
