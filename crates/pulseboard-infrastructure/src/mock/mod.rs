//! In-process mock data source.
//!
//! Every call sleeps for a configurable delay to simulate network latency and
//! then resolves to fixture data.

mod auth;
mod dashboard;
pub mod fixtures;
mod notifications;

pub use auth::MockAuthService;
pub use dashboard::MockDashboardService;
pub use notifications::MockNotificationService;
