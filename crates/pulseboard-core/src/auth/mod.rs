//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: User, credential and grant models
//! - `service`: The authentication data-source trait
//!
//! # Usage
//!
//! ```ignore
//! use pulseboard_core::auth::{AuthService, Credentials, User};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{AuthGrant, Credentials, User};
pub use service::AuthService;
