//! HTTP request handlers.

pub mod actions;
pub mod health;

pub use actions::dispatch_action;
pub use health::{health_check, readiness_check};
