//! Dashboard domain module.
//!
//! # Module Structure
//!
//! - `model`: Stats, chart series, categorical charts, activities, snapshot
//! - `sort`: Activity table ordering policy
//! - `service`: The dashboard data-source trait

mod model;
mod service;
mod sort;

// Re-export public API
pub use model::{
    Activity, CategoricalCharts, CategoryDatum, ChartPoint, DashboardSnapshot, StatEntry,
    StatMetric, StatsBlock,
};
pub use service::DashboardService;
pub use sort::{ActivitySort, SortDirection, SortField};
