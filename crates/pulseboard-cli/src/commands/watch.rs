use anyhow::{Result, bail};
use pulseboard_application::Intent;

use super::render;
use crate::bootstrap::App;

/// Prints one line per live-update tick until `ticks` were seen.
pub async fn run(app: &App, ticks: u32) -> Result<()> {
    if !app.config.live_update.enabled {
        bail!("Live updates are disabled in the configuration");
    }
    app.require_session().await?;

    let coordinator = &app.coordinator;
    let store = coordinator.dashboard();
    let mut signals = store.subscribe();
    app.live_update.attach();

    coordinator.dispatch(Intent::FetchDashboard).await?;
    let Some(stats) = store.snapshot().await.stats else {
        bail!("No dashboard data available");
    };
    println!("initial  {}", render::stats_line(&stats));
    signals.borrow_and_update();

    let mut seen = 0;
    while seen < ticks {
        signals.changed().await?;
        signals.borrow_and_update();
        let state = store.snapshot().await;
        let Some(stats) = state.stats else {
            break;
        };
        seen += 1;
        println!("tick {:>3} {}", seen, render::stats_line(&stats));
    }

    app.live_update.shutdown();
    Ok(())
}
