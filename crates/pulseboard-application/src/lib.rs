//! Application layer for Pulseboard.
//!
//! Holds the stores read by the view and the coordinator that mutates them:
//!
//! - [`SessionStore`]: authentication state and its durable copy
//! - [`DashboardStore`]: stats, charts and activities
//! - [`NotificationStore`]: the notification inbox
//! - [`EffectCoordinator`]: turns [`Intent`]s into data source calls and store
//!   mutations, latest call wins
//! - [`LiveUpdateScheduler`]: jitters loaded dashboard data on a timer

pub mod channel;
pub mod coordinator;
pub mod dashboard_store;
pub mod live_update;
pub mod notification_store;
pub mod session_store;

pub use coordinator::{DataSources, EffectCoordinator, Intent};
pub use dashboard_store::{DashboardSignal, DashboardState, DashboardStore};
pub use live_update::LiveUpdateScheduler;
pub use notification_store::{NotificationState, NotificationStore};
pub use session_store::{SessionState, SessionStore};
