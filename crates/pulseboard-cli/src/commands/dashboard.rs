use anyhow::{Result, bail};
use pulseboard_application::Intent;
use pulseboard_core::dashboard::DashboardSnapshot;

use super::render;
use crate::bootstrap::App;

pub async fn show(app: &App, refresh: bool, json: bool) -> Result<()> {
    app.require_session().await?;
    let coordinator = &app.coordinator;

    coordinator.dispatch(Intent::FetchDashboard).await?;
    if refresh {
        coordinator.dispatch(Intent::RefreshStats).await?;
    }

    let state = coordinator.dashboard().snapshot().await;
    if let Some(error) = &state.error {
        eprintln!("warning: {}", error);
    }
    let (Some(stats), Some(chart_series)) = (state.stats, state.chart_series) else {
        bail!("No dashboard data available");
    };

    if json {
        let snapshot = DashboardSnapshot {
            stats,
            chart_series,
            charts: state.charts,
            activities: state.activities,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Stats:");
    render::stats(&stats);
    println!("Development activity:");
    render::chart(&chart_series);
    render::categories("Donut", &state.charts.donut);
    render::categories("Pie", &state.charts.pie);
    println!("Activities:");
    render::activities(&state.activities);
    Ok(())
}
