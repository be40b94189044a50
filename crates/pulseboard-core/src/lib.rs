//! Domain layer for Pulseboard.
//!
//! Holds the models, data-source contracts and storage contract shared by the
//! infrastructure and application crates. Nothing here performs I/O.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod storage;

// Re-export common error type
pub use error::{PulseError, Result};
