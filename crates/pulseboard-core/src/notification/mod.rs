//! Notification domain module.

mod model;
mod service;

pub use model::Notification;
pub use service::NotificationService;
