//! HTTP request handlers

pub mod calls;
pub mod dashboard;
pub mod health;

pub use calls::configure as configure_calls;
pub use dashboard::configure as configure_dashboard;
pub use health::health_check;
