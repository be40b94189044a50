//! Dashboard data-source contract.

use async_trait::async_trait;

use super::model::{DashboardSnapshot, StatsBlock};
use crate::error::Result;

/// Remote-style source of dashboard data.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Fetches a complete snapshot (stats, series, categorical charts, activities).
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot>;

    /// Fetches a fresh stats block only.
    async fn refresh_stats(&self) -> Result<StatsBlock>;
}
