//! Infrastructure layer for Pulseboard.
//!
//! Concrete implementations of the core contracts: durable key-value storage,
//! configuration loading and the in-process mock data source.

pub mod config_service;
pub mod mock;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::mock::{MockAuthService, MockDashboardService, MockNotificationService};
pub use crate::paths::PulsePaths;
pub use crate::storage::{JsonFileKeyValueStore, MemoryKeyValueStore};
