use anyhow::Result;
use pulseboard_application::Intent;
use pulseboard_core::dashboard::{ActivitySort, SortField};

use super::render;
use crate::bootstrap::App;

pub async fn show(
    app: &App,
    sort: Option<SortField>,
    toggle: bool,
    delete: Option<u64>,
) -> Result<()> {
    app.require_session().await?;
    let coordinator = &app.coordinator;

    coordinator.dispatch(Intent::FetchDashboard).await?;
    if let Some(id) = delete {
        coordinator.dispatch(Intent::DeleteActivity(id)).await?;
    }

    let mut order = ActivitySort::new();
    if let Some(field) = sort {
        order.toggle(field);
        if toggle {
            order.toggle(field);
        }
    }

    let state = coordinator.dashboard().snapshot().await;
    render::activities(&order.apply(&state.activities));
    Ok(())
}
