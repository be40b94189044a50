pub mod activities;
pub mod dashboard;
pub mod notifications;
pub mod render;
pub mod session;
pub mod watch;
